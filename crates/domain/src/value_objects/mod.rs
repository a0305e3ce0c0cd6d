//! Value Objects - Immutable, identity-less domain primitives

mod date_key;
mod event_id;
mod event_kind;
mod hex_color;
mod timezone;
mod year_month;

pub use date_key::{DateKey, Weekday, day_number, days_in_month, is_leap_year, weekday_of};
pub use event_id::EventId;
pub use event_kind::EventKind;
pub use hex_color::HexColor;
pub use timezone::Timezone;
pub use year_month::YearMonth;
