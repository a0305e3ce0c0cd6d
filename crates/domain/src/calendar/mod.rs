//! Calendar geometry, aggregation and presentation

mod aggregate;
mod classifier;
mod density;
mod grid;
mod header;

pub use aggregate::DayAggregate;
pub use classifier::{
    Category, CategoryClassifier, ColorSource, DayPresentation, Dot, MASS_LABEL, PLACEHOLDER_TIME,
    Pill, PillRole, ViewportClass,
};
pub use density::{WEEKDAY_INITIALS, WeeklyLoad};
pub use grid::{DayCell, MonthGrid};
pub use header::DayHeader;
