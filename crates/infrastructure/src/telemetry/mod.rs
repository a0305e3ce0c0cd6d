//! Structured logging setup
//!
//! Installs a `tracing` subscriber with an `EnvFilter`. `RUST_LOG` wins over
//! the configured filter. Output goes to stderr so command output on stdout
//! stays clean.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
