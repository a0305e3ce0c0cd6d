//! Canonical `YYYY-MM-DD` date key
//!
//! The join key between grid cells, aggregated events and cache entries.
//! Arithmetic works on a proleptic Gregorian day number so every `i32` year
//! is supported, independent of locale and of chrono's representable range.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// Day of the week, Sunday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in grid column order
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Column index with Sunday = 0
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Weekday from a Sunday-based index (wraps modulo 7)
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    /// Capitalized Portuguese name, as shown in the day panel header
    #[must_use]
    pub const fn label_pt(self) -> &'static str {
        match self {
            Self::Sunday => "Domingo",
            Self::Monday => "Segunda-feira",
            Self::Tuesday => "Terça-feira",
            Self::Wednesday => "Quarta-feira",
            Self::Thursday => "Quinta-feira",
            Self::Friday => "Sexta-feira",
            Self::Saturday => "Sábado",
        }
    }

    /// Three-letter column header
    #[must_use]
    pub const fn short_pt(self) -> &'static str {
        match self {
            Self::Sunday => "Dom",
            Self::Monday => "Seg",
            Self::Tuesday => "Ter",
            Self::Wednesday => "Qua",
            Self::Thursday => "Qui",
            Self::Friday => "Sex",
            Self::Saturday => "Sáb",
        }
    }
}

/// Whether `year` is a Gregorian leap year
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days since 1970-01-01 for a civil date (month 1-12, day may be 0)
///
/// Day 0 resolves to the last day of the previous month, which is how month
/// lengths are derived.
///
/// Computed by hand instead of through chrono: `NaiveDate` stops near year
/// ±262 000, while this must be total over every `i32` year.
#[must_use]
pub const fn day_number(year: i32, month: u8, day: u8) -> i64 {
    let (y, m) = if month <= 2 {
        (year as i64 - 1, month as i64 + 9)
    } else {
        (year as i64, month as i64 - 3)
    };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * m + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Number of days in a month (1-12), via "day 0 of the next month"
#[must_use]
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    if month >= 12 {
        // December never varies, and year + 1 may overflow
        return 31;
    }
    let last = day_number(year, month + 1, 0);
    (last - day_number(year, month, 1) + 1) as u8
}

/// Weekday of a civil date
#[must_use]
pub const fn weekday_of(year: i32, month: u8, day: u8) -> Weekday {
    // 1970-01-01 was a Thursday
    let idx = (day_number(year, month, day) + 4).rem_euclid(7);
    Weekday::from_index(idx as usize)
}

/// A calendar day key, formatted as zero-padded `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    year: i32,
    month: u8,
    day: u8,
}

impl DateKey {
    /// Build a key from its parts, rejecting days that do not exist
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DomainError::InvalidDateKey(format!(
                "{year:04}-{month:02}-{day:02}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Caller guarantees the parts form a real date
    pub(crate) const fn from_parts_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse a canonical `YYYY-MM-DD` key
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidDateKey(s.to_string());

        // A leading '-' belongs to the year
        let (sign, body) = s.strip_prefix('-').map_or((1i64, s), |rest| (-1, rest));
        let mut parts = body.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if y.len() < 4 || m.len() != 2 || d.len() != 2 {
            return Err(invalid());
        }
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !(all_digits(y) && all_digits(m) && all_digits(d)) {
            return Err(invalid());
        }

        // Magnitude first: "2147483648" only fits i32 once negated
        let magnitude = y.parse::<i64>().map_err(|_| invalid())?;
        let year = i32::try_from(sign * magnitude).map_err(|_| invalid())?;
        let month = m.parse::<u8>().map_err(|_| invalid())?;
        let day = d.parse::<u8>().map_err(|_| invalid())?;
        Self::new(year, month, day).map_err(|_| invalid())
    }

    /// Year component
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month component (1-12)
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day-of-month component
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Weekday of this date
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        weekday_of(self.year, self.month, self.day)
    }

    /// Days since 1970-01-01
    #[must_use]
    pub const fn day_number(&self) -> i64 {
        day_number(self.year, self.month, self.day)
    }

    /// Key for the following day
    #[must_use]
    pub fn succ(&self) -> Self {
        if self.day < days_in_month(self.year, self.month) {
            Self {
                day: self.day + 1,
                ..*self
            }
        } else if self.month < 12 {
            Self {
                month: self.month + 1,
                day: 1,
                ..*self
            }
        } else {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
                day: 1,
            }
        }
    }

    /// Key `days` days after this one
    #[must_use]
    pub fn plus_days(&self, days: u32) -> Self {
        (0..days).fold(*self, |key, _| key.succ())
    }

    /// Convert to a chrono date, when representable
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, u32::from(self.month), u32::from(self.day))
    }
}

impl From<NaiveDate> for DateKey {
    #[allow(clippy::cast_possible_truncation)]
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        // chrono guarantees month/day ranges
        Self {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(
                f,
                "-{:04}-{:02}-{:02}",
                self.year.unsigned_abs(),
                self.month,
                self.day
            )
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
