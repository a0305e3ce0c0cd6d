//! Domain layer for the parish calendar
//!
//! Date keys, month grids, event records and their grouping and
//! classification. Pure types and functions, no I/O.

pub mod calendar;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use calendar::*;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
