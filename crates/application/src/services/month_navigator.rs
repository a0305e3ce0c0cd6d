//! Month navigation for the calendar view

use std::{fmt, sync::Arc};

use domain::{DateKey, Timezone, YearMonth};
use tracing::debug;

use crate::ports::ClockPort;

/// Tracks which month the calendar shows
pub struct MonthNavigator {
    current: YearMonth,
    clock: Arc<dyn ClockPort>,
    timezone: Timezone,
}

impl fmt::Debug for MonthNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonthNavigator")
            .field("current", &self.current)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

impl MonthNavigator {
    /// Start at `initial`
    pub fn new(initial: YearMonth, clock: Arc<dyn ClockPort>, timezone: Timezone) -> Self {
        Self {
            current: initial,
            clock,
            timezone,
        }
    }

    /// Start at the parish's current month
    pub fn starting_today(clock: Arc<dyn ClockPort>, timezone: Timezone) -> Self {
        let today = timezone.local_date_key(clock.now());
        Self::new(YearMonth::of(&today), clock, timezone)
    }

    #[must_use]
    pub const fn current(&self) -> YearMonth {
        self.current
    }

    /// Today's date in the parish time zone
    #[must_use]
    pub fn today_key(&self) -> DateKey {
        self.timezone.local_date_key(self.clock.now())
    }

    pub fn previous(&mut self) -> YearMonth {
        self.go_to(self.current.previous())
    }

    pub fn next(&mut self) -> YearMonth {
        self.go_to(self.current.next())
    }

    /// Jump to the month containing today
    pub fn today(&mut self) -> YearMonth {
        let today = self.today_key();
        self.go_to(YearMonth::of(&today))
    }

    pub fn go_to(&mut self, month: YearMonth) -> YearMonth {
        debug!(from = %self.current, to = %month, "Navigating calendar");
        self.current = month;
        month
    }
}
