//! Infrastructure layer - Adapters for the outside world
//!
//! Implements the application ports (event store, clock) and carries the
//! process-level concerns: configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, CacheConfig, CalendarConfig, ConfigError, PanelConfig, StoreConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
