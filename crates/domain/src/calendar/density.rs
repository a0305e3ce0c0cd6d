//! Weekly load: how many events fall on each weekday

use std::ops::Index;

use serde::Serialize;

use crate::{
    entities::EventRecord,
    value_objects::{DateKey, Weekday},
};

/// Single-letter weekday labels for the load chart, Sunday first
pub const WEEKDAY_INITIALS: [&str; 7] = ["D", "S", "T", "Q", "Q", "S", "S"];

/// Event counts per weekday, Sunday first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyLoad {
    counts: [u32; 7],
}

impl WeeklyLoad {
    /// Count events whose date falls in `from..from + 7 days`
    #[must_use]
    pub fn over_week<'a>(from: DateKey, events: impl IntoIterator<Item = &'a EventRecord>) -> Self {
        let start = from.day_number();
        let end = start + 7;
        Self::from_events(
            events
                .into_iter()
                .filter(|event| (start..end).contains(&event.date_key.day_number())),
        )
    }

    /// Count every event by weekday
    #[must_use]
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a EventRecord>) -> Self {
        let mut counts = [0u32; 7];
        for event in events {
            let slot = &mut counts[event.date_key.weekday().index()];
            *slot = slot.saturating_add(1);
        }
        Self { counts }
    }

    #[must_use]
    pub const fn counts(&self) -> [u32; 7] {
        self.counts
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Tallest bar, never below 1 so ratios stay finite
    #[must_use]
    pub fn peak(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0).max(1)
    }

    /// Bar height relative to the peak, in `0.0..=1.0`
    #[must_use]
    pub fn ratio(&self, weekday: Weekday) -> f64 {
        f64::from(self[weekday]) / f64::from(self.peak())
    }
}

impl Index<Weekday> for WeeklyLoad {
    type Output = u32;

    fn index(&self, weekday: Weekday) -> &u32 {
        &self.counts[weekday.index()]
    }
}
