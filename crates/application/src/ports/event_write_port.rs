//! Event write port
//!
//! Create, update, approve and delete events in the remote store. Callers are
//! responsible for invalidating cached days after a successful write.

use async_trait::async_trait;
use domain::{DateKey, EventId, EventRecord};
#[cfg(test)]
use mockall::automock;

use super::EventSourceError;

/// Result of an update: the stored event and the day it was on before
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedEvent {
    pub event: EventRecord,
    pub previous_date: DateKey,
}

/// Write side of the parish event store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventWritePort: Send + Sync {
    /// Store a new event and return it as stored
    async fn create_event(&self, event: EventRecord) -> Result<EventRecord, EventSourceError>;

    /// Replace an existing event (matched by id)
    async fn update_event(&self, event: EventRecord) -> Result<UpdatedEvent, EventSourceError>;

    /// Mark a pending event approved
    async fn approve_event(&self, id: &EventId) -> Result<EventRecord, EventSourceError>;

    /// Remove an event, returning the record that was deleted
    async fn delete_event(&self, id: &EventId) -> Result<EventRecord, EventSourceError>;
}
