//! Configuration management for visual search sessions.

pub mod constants;
mod sub_configs;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

pub use sub_configs::{LimitsConfig, LoggingConfig, ServiceConfig};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{VISUAL_SEARCH_ENV}.toml (environment-specific)
    /// 3. Environment variables with VISUAL_SEARCH prefix, e.g.
    ///    `VISUAL_SEARCH__SERVICE__BASE_URL`
    pub fn load() -> ConfigResult<Self> {
        let env = std::env::var(constants::ENV_SELECTOR_VAR)
            .unwrap_or_else(|_| "development".to_string());
        debug!("Loading configuration for environment '{}'", env);

        let builder = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                ::config::Environment::with_prefix(constants::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration with built-in defaults.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Load configuration from a single TOML file.
    pub fn from_file(path: &std::path::Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> ConfigResult<()> {
        let base_url = self.service.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("service.base_url cannot be empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "service.base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        if self.service.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "service.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.limits.raw_result_cap == 0 {
            return Err(ConfigError::Invalid(
                "limits.raw_result_cap must be greater than 0".into(),
            ));
        }

        if self.limits.display_cap == 0 {
            return Err(ConfigError::Invalid(
                "limits.display_cap must be greater than 0".into(),
            ));
        }

        if self.limits.raw_result_cap > constants::DEFAULT_RAW_RESULT_CAP {
            return Err(ConfigError::Invalid(format!(
                "limits.raw_result_cap ({}) cannot exceed {}",
                self.limits.raw_result_cap, constants::DEFAULT_RAW_RESULT_CAP
            )));
        }

        if self.limits.display_cap > constants::DEFAULT_DISPLAY_CAP {
            return Err(ConfigError::Invalid(format!(
                "limits.display_cap ({}) cannot exceed {}",
                self.limits.display_cap, constants::DEFAULT_DISPLAY_CAP
            )));
        }

        if self.limits.display_cap > self.limits.raw_result_cap {
            return Err(ConfigError::Invalid(format!(
                "limits.display_cap ({}) cannot exceed limits.raw_result_cap ({})",
                self.limits.display_cap, self.limits.raw_result_cap
            )));
        }

        Ok(())
    }
}
