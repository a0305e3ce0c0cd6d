//! Month grid geometry
//!
//! A grid starts on Sunday. Cells before the 1st show the tail of the previous
//! month and carry no date key; only current-month cells are clickable.

use serde::Serialize;

use crate::{
    errors::DomainError,
    value_objects::{DateKey, YearMonth},
};

/// One square of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayCell {
    date_key: Option<DateKey>,
    day_number: u8,
    in_current_month: bool,
}

impl DayCell {
    const fn filler(day_number: u8) -> Self {
        Self {
            date_key: None,
            day_number,
            in_current_month: false,
        }
    }

    const fn current(key: DateKey) -> Self {
        Self {
            date_key: Some(key),
            day_number: key.day(),
            in_current_month: true,
        }
    }

    /// Date key, `None` for filler cells
    #[must_use]
    pub const fn date_key(&self) -> Option<DateKey> {
        self.date_key
    }

    #[must_use]
    pub const fn day_number(&self) -> u8 {
        self.day_number
    }

    #[must_use]
    pub const fn in_current_month(&self) -> bool {
        self.in_current_month
    }
}

/// Ordered cells for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    year_month: YearMonth,
    leading_filler: usize,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Compute the grid for a month
    #[must_use]
    pub fn new(year_month: YearMonth) -> Self {
        let first = year_month.first_day();
        let leading_filler = first.weekday().index();
        let previous_len = year_month.previous().days();
        let days = year_month.days();

        let mut cells = Vec::with_capacity(leading_filler + usize::from(days));
        // leading_filler is at most 6, previous_len at least 28
        #[allow(clippy::cast_possible_truncation)]
        let first_filler = previous_len - leading_filler as u8 + 1;
        cells.extend((first_filler..=previous_len).map(DayCell::filler));

        let mut key = first;
        for _ in 0..days {
            cells.push(DayCell::current(key));
            key = key.succ();
        }

        Self {
            year_month,
            leading_filler,
            cells,
        }
    }

    /// Grid for a raw year and 1-based month
    pub fn for_month(year: i32, month: u8) -> Result<Self, DomainError> {
        Ok(Self::new(YearMonth::new(year, month)?))
    }

    /// Pad with next-month cells (numbered from 1) up to a whole number of weeks
    #[must_use]
    pub fn with_trailing_filler(mut self) -> Self {
        // always below 7
        #[allow(clippy::cast_possible_truncation)]
        let missing = ((7 - self.cells.len() % 7) % 7) as u8;
        self.cells.extend((1..=missing).map(DayCell::filler));
        self
    }

    #[must_use]
    pub const fn year_month(&self) -> YearMonth {
        self.year_month
    }

    #[must_use]
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Number of previous-month cells, equal to the weekday index of the 1st
    #[must_use]
    pub const fn leading_filler_count(&self) -> usize {
        self.leading_filler
    }

    #[must_use]
    pub const fn days_in_month(&self) -> u8 {
        self.year_month.days()
    }

    /// Cells in rows of seven; the last row may be short without trailing filler
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// Keys of the current month's days, in order
    pub fn current_month_keys(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.cells.iter().filter_map(DayCell::date_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(year: i32, month: u8) -> MonthGrid {
        MonthGrid::for_month(year, month).unwrap()
    }

    #[test]
    fn january_2026_starts_on_thursday() {
        let g = grid(2026, 1);
        assert_eq!(g.leading_filler_count(), 4);
        let filler: Vec<u8> = g.cells()[..4].iter().map(DayCell::day_number).collect();
        assert_eq!(filler, vec![28, 29, 30, 31]);
        assert!(g.cells()[..4].iter().all(|c| c.date_key().is_none()));
        assert_eq!(
            g.cells()[4].date_key().map(|k| k.to_string()).as_deref(),
            Some("2026-01-01")
        );
        assert_eq!(g.cells().len(), 4 + 31);
    }

    #[test]
    fn month_starting_on_sunday_has_no_filler() {
        // 2026-02-01 is a Sunday
        let g = grid(2026, 2);
        assert_eq!(g.leading_filler_count(), 0);
        assert_eq!(g.cells().len(), 28);
        assert!(g.cells()[0].in_current_month());
    }

    #[test]
    fn leap_year_day_counts() {
        assert_eq!(grid(2024, 2).days_in_month(), 29);
        assert_eq!(grid(2025, 2).days_in_month(), 28);
        assert_eq!(grid(2000, 2).days_in_month(), 29);
        assert_eq!(grid(1900, 2).days_in_month(), 28);
        assert_eq!(grid(2024, 2).current_month_keys().count(), 29);
    }

    #[test]
    fn march_filler_uses_february_length() {
        // 2024-03-01 is a Friday; February 2024 had 29 days
        let g = grid(2024, 3);
        let filler: Vec<u8> = g.cells()[..g.leading_filler_count()]
            .iter()
            .map(DayCell::day_number)
            .collect();
        assert_eq!(filler, vec![25, 26, 27, 28, 29]);
    }

    #[test]
    fn keys_are_contiguous_and_zero_padded() {
        let g = grid(2026, 3);
        let keys: Vec<String> = g.current_month_keys().map(|k| k.to_string()).collect();
        assert_eq!(keys.first().map(String::as_str), Some("2026-03-01"));
        assert_eq!(keys.last().map(String::as_str), Some("2026-03-31"));
        assert_eq!(keys[8], "2026-03-09");
    }

    #[test]
    fn trailing_filler_completes_last_week() {
        let g = grid(2026, 1).with_trailing_filler();
        assert_eq!(g.cells().len() % 7, 0);
        let tail: Vec<u8> = g.cells()[35..].iter().map(DayCell::day_number).collect();
        assert!(tail.is_empty());
        assert_eq!(g.weeks().count(), 5);

        let g = grid(2026, 5).with_trailing_filler();
        let last_week = g.weeks().last().unwrap();
        assert_eq!(last_week.len(), 7);
        assert!(!last_week.last().unwrap().in_current_month());
    }

    #[test]
    fn trailing_filler_is_idempotent() {
        let once = grid(2025, 8).with_trailing_filler();
        let twice = once.clone().with_trailing_filler();
        assert_eq!(once, twice);
    }

    #[test]
    fn extreme_years_do_not_panic() {
        assert_eq!(grid(i32::MAX, 12).days_in_month(), 31);
        assert_eq!(grid(i32::MIN, 1).days_in_month(), 31);
        assert_eq!(grid(-4, 2).days_in_month(), 29);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(matches!(
            MonthGrid::for_month(2026, 13),
            Err(DomainError::InvalidMonth(13))
        ));
    }
}
