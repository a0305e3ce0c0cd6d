//! Per-day grouping of event records

use std::collections::BTreeMap;

use crate::{entities::EventRecord, value_objects::DateKey};

/// Events grouped by date key
///
/// Within a day, events keep the order they were added in. A day with no
/// entry and a day with an empty list are indistinguishable to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAggregate {
    days: BTreeMap<DateKey, Vec<EventRecord>>,
}

impl DayAggregate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group records in a single pass; duplicates are kept
    #[must_use]
    pub fn from_events(events: impl IntoIterator<Item = EventRecord>) -> Self {
        let mut aggregate = Self::new();
        for event in events {
            aggregate.insert(event);
        }
        aggregate
    }

    /// Append an event to its day
    pub fn insert(&mut self, event: EventRecord) {
        self.days.entry(event.date_key).or_default().push(event);
    }

    /// Events for a day, empty when there are none
    #[must_use]
    pub fn events_for(&self, key: &DateKey) -> &[EventRecord] {
        self.days.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn has_events(&self, key: &DateKey) -> bool {
        !self.events_for(key).is_empty()
    }

    /// Number of events across all days
    #[must_use]
    pub fn total_events(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Number of days with at least one event
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.days.values().filter(|events| !events.is_empty()).count()
    }

    /// Days in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[EventRecord])> {
        self.days.iter().map(|(key, events)| (key, events.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_events() == 0
    }
}

impl FromIterator<EventRecord> for DayAggregate {
    fn from_iter<I: IntoIterator<Item = EventRecord>>(iter: I) -> Self {
        Self::from_events(iter)
    }
}
