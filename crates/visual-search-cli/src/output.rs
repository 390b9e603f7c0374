//! Human and JSON rendering of a session.

use anyhow::Result;
use visual_search_core::{ResultItem, SearchSession, SessionView};

/// Widest display name printed before truncation.
const NAME_WIDTH: usize = 40;

pub fn print_json(view: &SessionView) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

pub fn print_session(session: &SearchSession) {
    println!(
        "status: {} | probe: {:?} | cached: {} | showing: {}",
        session.status(),
        session.probe().kind(),
        session.raw_results().len(),
        session.displayed_results().len()
    );

    let criteria = session.criteria();
    if !criteria.is_unconstrained() {
        println!(
            "filters: gender={} colour={} category={} similarity>={}%",
            criteria.gender.map(|g| g.as_str()).unwrap_or("all"),
            criteria.base_colour.map(|c| c.as_str()).unwrap_or("all"),
            criteria.category.map(|c| c.as_str()).unwrap_or("all"),
            criteria.similarity_pct
        );
    }

    if let Some(message) = session.error_message() {
        println!("! {}", message);
    }

    if session.displayed_results().is_empty() {
        return;
    }

    println!(
        "{:>3}  {:>5}  {:<15}  {:<7}  {:<10}  {:<14}  {}",
        "#", "sim", "match", "gender", "colour", "category", "name"
    );
    for (rank, item) in session.displayed_results().iter().enumerate() {
        println!("{}", format_row(rank + 1, item));
    }
}

fn format_row(rank: usize, item: &ResultItem) -> String {
    format!(
        "{:>3}  {:>4}%  {:<15}  {:<7}  {:<10}  {:<14}  {}",
        rank,
        item.similarity_percent(),
        item.match_tier().label(),
        item.gender,
        item.base_colour,
        item.master_category,
        truncate(&item.display_name, NAME_WIDTH)
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
