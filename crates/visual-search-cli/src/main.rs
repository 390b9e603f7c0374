//! Visual Search CLI
//!
//! Command-line front end for visual similarity search sessions.
//!
//! # Commands
//!
//! - `search`: Submit one probe (file or URL), filter locally, print results
//! - `shell`: Drive a session interactively, one command per line on stdin
//!
//! # Configuration
//!
//! `--config PATH` loads a single TOML file. Without it, `config/default.toml`,
//! `config/{VISUAL_SEARCH_ENV}.toml` and `VISUAL_SEARCH__*` environment
//! variables are layered in that order.
//!
//! Exit code 0 on success, 1 on error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use visual_search_core::config::LoggingConfig;

mod commands;
mod output;

/// Visual Search CLI - find visually similar products
#[derive(Parser)]
#[command(name = "visual-search")]
#[command(version)]
#[command(about = "Search a product catalogue by image and refine the results locally")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once by file or URL and print the displayed results
    ///
    /// Facet options are applied locally to the cached results after the
    /// search returns.
    ///
    /// Examples:
    ///   visual-search search --url https://cdn.example.com/shirt.jpg
    ///   visual-search search --file ./shoe.png --gender women --min-similarity 60
    Search(commands::search::SearchArgs),
    /// Interactive session reading commands from stdin
    ///
    /// Type `help` for the command list.
    Shell(commands::shell::ShellArgs),
}

fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(commands::EXIT_ERROR);
        }
    };

    init_logging(cli.verbose, &config.logging);

    let exit_code = match cli.command {
        Commands::Search(args) => commands::search::handle_search(args, &config).await,
        Commands::Shell(args) => commands::shell::handle_shell(args, &config).await,
    };

    std::process::exit(exit_code);
}
