//! CLI command handlers
//!
//! # Modules
//!
//! - `search`: One-shot search with local filtering
//! - `shell`: Interactive session over stdin

pub mod search;
pub mod shell;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use visual_search_core::{Config, ProbeFile};

/// Process exit code for success.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code for validation, fetch and configuration errors.
pub const EXIT_ERROR: i32 = 1;

/// Load configuration from `path`, or from the layered defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load().context("failed to load configuration"),
    }
}

/// Read an image from disk into a file probe.
pub async fn read_probe_file(path: &Path) -> Result<ProbeFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    debug!(file_name = %file_name, bytes = bytes.len(), "Read probe image");

    Ok(ProbeFile::new(file_name, bytes)?)
}
