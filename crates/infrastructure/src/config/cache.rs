//! Event cache configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Event cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cached day in seconds (default: 5 minutes)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

const fn default_ttl_secs() -> u64 {
    5 * 60 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Get the TTL as a Duration
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
