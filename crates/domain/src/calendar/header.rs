//! Day panel header labels

use std::fmt;

use serde::Serialize;

use crate::value_objects::{DateKey, YearMonth};

/// Header of the day panel: "18", "JAN", "Domingo"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub day: u8,
    pub month_short: &'static str,
    pub weekday: &'static str,
}

impl DayHeader {
    #[must_use]
    pub const fn for_date(key: &DateKey) -> Self {
        Self {
            day: key.day(),
            month_short: YearMonth::of(key).short_name_pt(),
            weekday: key.weekday().label_pt(),
        }
    }
}

impl fmt::Display for DayHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {} · {}", self.day, self.month_short, self.weekday)
    }
}
