//! Sub-configuration structures for the search session.
//!
//! This module contains the individual configuration structs
//! that make up the main `Config` structure.

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_BASE_URL, DEFAULT_DISPLAY_CAP, DEFAULT_LOG_LEVEL, DEFAULT_RAW_RESULT_CAP,
    DEFAULT_SEARCH_PATH, DEFAULT_TIMEOUT_SECS,
};

/// Remote search service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service address, e.g. `https://search.example.com`
    pub base_url: String,
    /// Endpoint path appended to `base_url`
    pub search_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Full search endpoint URL.
    ///
    /// One trailing `/` is stripped from the base URL and the path is joined
    /// with exactly one `/`.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let path = self.search_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

/// Result set bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Results kept from each service response
    pub raw_result_cap: usize,
    /// Results shown after filtering
    pub display_cap: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            raw_result_cap: DEFAULT_RAW_RESULT_CAP,
            display_cap: DEFAULT_DISPLAY_CAP,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when no verbosity flag is given
    pub level: String,
    /// "pretty" or "compact"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: "pretty".to_string(),
        }
    }
}
