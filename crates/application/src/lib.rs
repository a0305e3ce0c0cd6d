//! Application layer - Use cases and orchestration
//!
//! Contains the event cache, the day panel state machine, month rendering and
//! the write path, plus the port definitions they depend on.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod test_support;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
