//! Error types for visual-search-core.
//!
//! [`SessionError`] is what the presentation layer sees: a validation message
//! it can show inline, or a generic transport failure. The underlying HTTP
//! cause lives in [`crate::client::ClientError`] and is only logged.
//!
//! # Examples
//!
//! ```rust
//! use visual_search_core::SessionError;
//!
//! let err = SessionError::Transport;
//! assert_eq!(err.to_string(), "fetch failed");
//! assert!(SessionError::validation("no probe supplied").is_validation());
//! ```

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

/// Shown when a search is submitted without a file or URL.
pub const MSG_NO_PROBE_SUPPLIED: &str = "no probe supplied";

/// Shown when filters are applied without a file or URL.
pub const MSG_NO_PROBE_ACTIVE: &str = "no probe active";

/// Shown for every transport, status or decode failure of a search.
pub const MSG_FETCH_FAILED: &str = "fetch failed";

/// Informational message when the filters exclude every cached result.
pub const MSG_NO_MATCHING_RESULTS: &str = "no results match filters";

// =============================================================================
// SESSION ERRORS
// =============================================================================

/// Errors surfaced by session operations.
///
/// Neither variant is fatal. Both are cleared by the next corrective action
/// (supplying a probe, retrying the search).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Input was missing or inconsistent; the user must correct it.
    #[error("{0}")]
    Validation(String),

    /// The search request failed. The specific cause is not retained.
    #[error("fetch failed")]
    Transport,
}

impl SessionError {
    /// Build a validation error from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error asks the user to correct their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

/// Errors raised while loading or validating [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_hides_cause() {
        assert_eq!(SessionError::Transport.to_string(), MSG_FETCH_FAILED);
        assert!(!SessionError::Transport.is_validation());
    }

    #[test]
    fn test_validation_error_displays_message() {
        let err = SessionError::validation(MSG_NO_PROBE_SUPPLIED);
        assert_eq!(err.to_string(), "no probe supplied");
        assert!(err.is_validation());
    }

    #[test]
    fn test_config_read_error_names_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("/etc/visual-search.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/etc/visual-search.toml"));
    }
}
