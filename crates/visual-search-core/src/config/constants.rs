//! Default values shared by configuration and the session components.

/// Search service address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path of the search endpoint, appended to the base URL.
pub const DEFAULT_SEARCH_PATH: &str = "/api/products/search";

/// Request timeout for a search, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of service results kept in the raw cache.
pub const DEFAULT_RAW_RESULT_CAP: usize = 16;

/// Maximum number of results shown after filtering.
pub const DEFAULT_DISPLAY_CAP: usize = 12;

/// Log level when neither `-v` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable selecting `config/{env}.toml`.
pub const ENV_SELECTOR_VAR: &str = "VISUAL_SEARCH_ENV";

/// Prefix for `VISUAL_SEARCH__SECTION__KEY` overrides.
pub const ENV_PREFIX: &str = "VISUAL_SEARCH";
