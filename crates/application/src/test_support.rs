//! Test doubles shared by the service tests

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use domain::{DateKey, EventId, EventKind, EventRecord};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::ports::{ClockPort, EventSourceError, EventSourcePort};

pub fn key(raw: &str) -> DateKey {
    DateKey::parse(raw).unwrap()
}

pub fn event_on(id: &str, date: &str) -> EventRecord {
    EventRecord::new(EventId::new(id), key(date), EventKind::Meeting, format!("Evento {id}")).unwrap()
}

/// Clock that only moves when told to
pub struct FakeClock {
    now: Mutex<DateTime<Utc>>,
}

impl FakeClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::at(Utc.with_ymd_and_hms(2026, 1, 18, 12, 0, 0).unwrap())
    }
}

impl ClockPort for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// In-memory event source that counts fetches and can hold them until released
#[derive(Default)]
pub struct FakeSource {
    events: Mutex<Vec<EventRecord>>,
    fetches: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    gated_day: Option<DateKey>,
    failure: Mutex<Option<EventSourceError>>,
}

impl FakeSource {
    pub fn with_events(events: Vec<EventRecord>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Self::default()
        }
    }

    /// Every fetch waits for a `release`
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Only fetches covering `day` wait for a `release`
    pub fn gated_on(mut self, day: DateKey) -> Self {
        self.gated_day = Some(day);
        self.gated()
    }

    /// Let one held fetch complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn fail_with(&self, error: EventSourceError) {
        *self.failure.lock() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    pub fn push(&self, event: EventRecord) {
        self.events.lock().push(event);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSourcePort for FakeSource {
    async fn fetch_events_between(
        &self,
        start: DateKey,
        end: DateKey,
    ) -> Result<Vec<EventRecord>, EventSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let held = self
            .gated_day
            .is_none_or(|day| (start..=end).contains(&day));
        if let (Some(gate), true) = (&self.gate, held) {
            gate.acquire().await.unwrap().forget();
        }

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        Ok(self
            .events
            .lock()
            .iter()
            .filter(|e| (start..=end).contains(&e.date_key))
            .cloned()
            .collect())
    }
}
