//! Year/month pair used for month rendering and navigation

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::date_key::{DateKey, days_in_month};
use crate::errors::DomainError;

const MONTH_NAMES_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const MONTH_SHORT_PT: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// A calendar month of a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Create a year/month, validating the 1-based month
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(DomainError::InvalidMonth(month))
        }
    }

    /// Month containing the given day
    #[must_use]
    pub const fn of(key: &DateKey) -> Self {
        Self {
            year: key.year(),
            month: key.month(),
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// The following month, wrapping December into January of the next year
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month, wrapping January into December of the previous year
    #[must_use]
    pub const fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of days in this month
    #[must_use]
    pub const fn days(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// First day of the month
    #[must_use]
    pub const fn first_day(&self) -> DateKey {
        self.day_unchecked(1)
    }

    /// Last day of the month
    #[must_use]
    pub const fn last_day(&self) -> DateKey {
        self.day_unchecked(self.days())
    }

    /// Key for a day of this month, if it exists
    #[must_use]
    pub fn day(&self, day: u8) -> Option<DateKey> {
        DateKey::new(self.year, self.month, day).ok()
    }

    const fn day_unchecked(&self, day: u8) -> DateKey {
        DateKey::from_parts_unchecked(self.year, self.month, day)
    }

    /// Portuguese month name, e.g. "Janeiro"
    #[must_use]
    pub const fn name_pt(&self) -> &'static str {
        MONTH_NAMES_PT[(self.month - 1) as usize]
    }

    /// Upper-case three-letter Portuguese label, e.g. "JAN"
    #[must_use]
    pub const fn short_name_pt(&self) -> &'static str {
        MONTH_SHORT_PT[(self.month - 1) as usize]
    }

    /// Title used above the month grid, e.g. "Janeiro 2026"
    #[must_use]
    pub fn title_pt(&self) -> String {
        format!("{} {}", self.name_pt(), self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::ValidationError(format!("Invalid year/month: {s}"));
        let (y, m) = s.rsplit_once('-').ok_or_else(invalid)?;
        if m.len() != 2 {
            return Err(invalid());
        }
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u8>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
