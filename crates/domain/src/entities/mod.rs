//! Domain entities - Objects with identity and lifecycle

mod event_record;

pub use event_record::{DEFAULT_SEASON, EventRecord, EventStatus, MassSchedule, time_of_day};
