//! One-shot search command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{error, info};
use visual_search_core::{BaseColour, Category, Config, FilterCriteria, Gender, SearchSession};

use super::{read_probe_file, EXIT_ERROR, EXIT_SUCCESS};
use crate::output;

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Image file to search with (jpg, jpeg, png, gif, webp)
    #[arg(long, value_name = "PATH", conflicts_with = "url", required_unless_present = "url")]
    pub file: Option<PathBuf>,

    /// Image URL to search with
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Keep only Men, Women or Unisex results
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Keep only results of this base colour
    #[arg(long, visible_alias = "color")]
    pub colour: Option<BaseColour>,

    /// Keep only Apparel, Accessories, Footwear or Sporting Goods results
    #[arg(long)]
    pub category: Option<Category>,

    /// Minimum similarity percentage (0-100)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_similarity: u8,

    /// Output the session as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::new().with_similarity_pct(self.min_similarity)?;
        criteria.gender = self.gender;
        criteria.base_colour = self.colour;
        criteria.category = self.category;
        Ok(criteria)
    }
}

/// Handle the search command.
///
/// Returns 0 on success (including when the filters match nothing), 1 on error.
pub async fn handle_search(args: SearchArgs, config: &Config) -> i32 {
    match run_search(&args, config).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("Search failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}

async fn run_search(args: &SearchArgs, config: &Config) -> Result<()> {
    let criteria = args.criteria()?;
    let mut session =
        SearchSession::from_config(config).context("failed to create search client")?;

    match (&args.file, &args.url) {
        (Some(path), _) => session.set_file(read_probe_file(path).await?)?,
        (None, Some(url)) => session.set_url(url)?,
        (None, None) => bail!("provide --file or --url"),
    }

    session.set_criteria(criteria.clone());
    session.submit().await?;

    if !criteria.is_unconstrained() {
        let matched = session.apply_filters()?;
        info!(matched, "Applied filters to {} cached results", session.raw_results().len());
    }

    if args.json {
        output::print_json(&session.view())?;
    } else {
        output::print_session(&session);
    }
    Ok(())
}
