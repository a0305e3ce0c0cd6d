//! Application configuration
//!
//! Split into focused sub-modules:
//! - `calendar`: time zone, start month, viewport, day panel privilege
//! - `cache`: event cache TTL
//! - `store`: JSON event store location
//!
//! Sources, later ones winning: built-in defaults, an optional `config.toml`,
//! then `PARISH_*` environment variables with `__` between levels
//! (e.g. `PARISH_CACHE__TTL_SECS=60`).

mod cache;
mod calendar;
mod store;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use cache::CacheConfig;
pub use calendar::{CalendarConfig, PanelConfig};
pub use store::StoreConfig;

use crate::telemetry::TelemetryConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PARISH";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    /// Values were read but are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub panel: PanelConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `config.toml` when given
    ///
    /// An explicit path must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("calendar.timezone", "America/Sao_Paulo")?
            .set_default("cache.ttl_secs", 300)?
            .add_source(file)
            // Override with environment variables (e.g., PARISH_PANEL__CAN_EDIT=true)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            timezone = %config.calendar.timezone,
            ttl_secs = config.cache.ttl_secs,
            can_edit = config.panel.can_edit,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar
            .initial_year_month()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "cache.ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.telemetry.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "telemetry.log_filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
