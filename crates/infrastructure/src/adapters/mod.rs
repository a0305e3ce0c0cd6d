//! Adapters implementing application ports

mod clock;
mod json_event_store;

pub use clock::{ManualClock, SystemClock};
pub use json_event_store::{InMemoryEventStore, StoreError};
