//! Clock port
//!
//! Cache expiry and "today" navigation read time through this port so tests
//! can control it.

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

/// Source of the current instant
#[cfg_attr(test, automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
