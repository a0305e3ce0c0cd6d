//! In-memory event store, optionally backed by a JSON file
//!
//! Implements both the read and write ports. With a backing file, every
//! successful write is persisted before it is reported.

use std::path::{Path, PathBuf};

use application::ports::{EventSourceError, EventSourcePort, EventWritePort, UpdatedEvent};
use async_trait::async_trait;
use domain::{DateKey, EventId, EventRecord};
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Errors while loading or saving the store file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access event file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid event file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Event store holding records in memory
///
/// Writers are serialized. Each one builds the next record list from the
/// current one, persists it, and only then makes it visible, so a failed
/// save leaves the store unchanged.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<EventRecord>>,
    path: Option<PathBuf>,
    writer: Mutex<()>,
}

impl InMemoryEventStore {
    /// Empty store without a backing file
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with records, without a backing file
    #[must_use]
    pub fn with_events(events: Vec<EventRecord>) -> Self {
        Self {
            events: RwLock::new(events),
            ..Self::default()
        }
    }

    /// Load a JSON array of records; a missing file yields an empty store
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let events = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => parse_events(&path, &raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Event file not found, starting empty");
                Vec::new()
            },
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        info!(path = %path.display(), events = events.len(), "Event store loaded");
        Ok(Self {
            events: RwLock::new(events),
            path: Some(path),
            writer: Mutex::new(()),
        })
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Write the current records to the backing file, if any
    pub async fn save(&self) -> Result<(), StoreError> {
        let _writer = self.writer.lock().await;
        match &self.path {
            Some(path) => write_events(path, &self.snapshot()).await,
            None => Ok(()),
        }
    }

    fn snapshot(&self) -> Vec<EventRecord> {
        self.events.read().clone()
    }

    /// Persist `next`, then make it the visible state
    ///
    /// Callers must hold the writer lock.
    async fn commit(&self, next: Vec<EventRecord>) -> Result<(), EventSourceError> {
        if let Some(path) = &self.path {
            write_events(path, &next).await.map_err(|e| {
                warn!(error = %e, "Write not persisted, store left unchanged");
                EventSourceError::Database(e.to_string())
            })?;
        }
        *self.events.write() = next;
        Ok(())
    }

    fn position(events: &[EventRecord], id: &EventId) -> Result<usize, EventSourceError> {
        events
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| EventSourceError::NotFound(format!("event {id}")))
    }
}

async fn write_events(path: &Path, events: &[EventRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(events).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "Event store saved");
    Ok(())
}

fn parse_events(path: &Path, raw: &str) -> Result<Vec<EventRecord>, StoreError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl EventSourcePort for InMemoryEventStore {
    #[instrument(skip(self), fields(start = %start, end = %end))]
    async fn fetch_events_between(
        &self,
        start: DateKey,
        end: DateKey,
    ) -> Result<Vec<EventRecord>, EventSourceError> {
        let events: Vec<EventRecord> = self
            .events
            .read()
            .iter()
            .filter(|e| (start..=end).contains(&e.date_key))
            .cloned()
            .collect();
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }
}

#[async_trait]
impl EventWritePort for InMemoryEventStore {
    #[instrument(skip(self, event), fields(id = %event.id))]
    async fn create_event(&self, event: EventRecord) -> Result<EventRecord, EventSourceError> {
        let _writer = self.writer.lock().await;
        let mut next = self.snapshot();
        if next.iter().any(|e| e.id == event.id) {
            return Err(EventSourceError::Duplicate(format!("event {}", event.id)));
        }
        next.push(event.clone());
        self.commit(next).await?;
        Ok(event)
    }

    #[instrument(skip(self, event), fields(id = %event.id))]
    async fn update_event(&self, event: EventRecord) -> Result<UpdatedEvent, EventSourceError> {
        let _writer = self.writer.lock().await;
        let mut next = self.snapshot();
        let index = Self::position(&next, &event.id)?;
        let previous_date = std::mem::replace(&mut next[index], event.clone()).date_key;
        self.commit(next).await?;
        Ok(UpdatedEvent {
            event,
            previous_date,
        })
    }

    #[instrument(skip(self))]
    async fn approve_event(&self, id: &EventId) -> Result<EventRecord, EventSourceError> {
        let _writer = self.writer.lock().await;
        let mut next = self.snapshot();
        let index = Self::position(&next, id)?;
        next[index].approve();
        let approved = next[index].clone();
        self.commit(next).await?;
        Ok(approved)
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: &EventId) -> Result<EventRecord, EventSourceError> {
        let _writer = self.writer.lock().await;
        let mut next = self.snapshot();
        let index = Self::position(&next, id)?;
        let deleted = next.remove(index);
        self.commit(next).await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use domain::{EventKind, EventStatus, YearMonth};

    use super::*;

    fn key(raw: &str) -> DateKey {
        DateKey::parse(raw).unwrap()
    }

    fn event(id: &str, date: &str) -> EventRecord {
        EventRecord::new(EventId::new(id), key(date), EventKind::Liturgy, "Missa").unwrap()
    }

    #[tokio::test]
    async fn fetches_by_range_month_and_day() {
        let store = InMemoryEventStore::with_events(vec![
            event("a", "2025-12-31"),
            event("b", "2026-01-01"),
            event("c", "2026-01-18"),
            event("d", "2026-02-01"),
        ]);

        let january = store
            .fetch_events(YearMonth::new(2026, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(january.len(), 2);

        let day = store.fetch_events_for_day(key("2026-01-18")).await.unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].id.as_str(), "c");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_ids() {
        let store = InMemoryEventStore::with_events(vec![event("a", "2026-01-18")]);
        let result = store.create_event(event("a", "2026-01-19")).await;
        assert!(matches!(result, Err(EventSourceError::Duplicate(_))));
    }

    #[tokio::test]
    async fn update_reports_previous_date() {
        let store = InMemoryEventStore::with_events(vec![event("a", "2026-01-18")]);
        let updated = store.update_event(event("a", "2026-01-25")).await.unwrap();
        assert_eq!(updated.previous_date, key("2026-01-18"));
        assert_eq!(updated.event.date_key, key("2026-01-25"));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = InMemoryEventStore::new();
        let missing = EventId::new("nope");
        assert!(matches!(
            store.approve_event(&missing).await,
            Err(EventSourceError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_event(&missing).await,
            Err(EventSourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn approve_and_delete() {
        let pending = event("a", "2026-01-18").with_status(EventStatus::Pending);
        let store = InMemoryEventStore::with_events(vec![pending]);

        let approved = store.approve_event(&EventId::new("a")).await.unwrap();
        assert_eq!(approved.status, EventStatus::Approved);

        let deleted = store.delete_event(&EventId::new("a")).await.unwrap();
        assert_eq!(deleted.date_key, key("2026-01-18"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failed_approval_keeps_event_pending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let store = InMemoryEventStore::open(&path).await.unwrap();
        store
            .create_event(event("a", "2026-01-18").with_status(EventStatus::Pending))
            .await
            .unwrap();

        // Replace the file with a directory so the next save fails
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = store.approve_event(&EventId::new("a")).await;
        assert!(matches!(result, Err(EventSourceError::Database(_))));

        let day = store.fetch_events_for_day(key("2026-01-18")).await.unwrap();
        assert_eq!(day[0].status, EventStatus::Pending);
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = InMemoryEventStore::open(dir.path().join("events.json"))
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn writes_are_persisted_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let store = InMemoryEventStore::open(&path).await.unwrap();
        store.create_event(event("a", "2026-01-18")).await.unwrap();

        let reopened = InMemoryEventStore::open(&path).await.unwrap();
        assert_eq!(reopened.len(), 1);
        let events = reopened
            .fetch_events_for_day(key("2026-01-18"))
            .await
            .unwrap();
        assert_eq!(events[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn invalid_file_is_a_parse_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();
        let result = InMemoryEventStore::open(file.path()).await;
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }
}
