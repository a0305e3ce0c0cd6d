//! Event store settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the JSON event store lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_events_path")]
    pub events_path: PathBuf,
}

fn default_events_path() -> PathBuf {
    PathBuf::from("fixtures/events.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            events_path: default_events_path(),
        }
    }
}
