//! Agenda service
//!
//! The write path. Every successful write invalidates the cached days it
//! touched; the cache never invalidates itself.

use std::{fmt, sync::Arc};

use domain::{DateKey, EventId, EventRecord, EventStatus};
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, ports::EventWritePort, services::event_cache::EventCache};

/// Service for creating, editing and approving events
pub struct AgendaService {
    writer: Arc<dyn EventWritePort>,
    cache: Arc<EventCache>,
    can_edit: bool,
}

impl fmt::Debug for AgendaService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgendaService")
            .field("can_edit", &self.can_edit)
            .finish_non_exhaustive()
    }
}

impl AgendaService {
    pub fn new(writer: Arc<dyn EventWritePort>, cache: Arc<EventCache>, can_edit: bool) -> Self {
        Self {
            writer,
            cache,
            can_edit,
        }
    }

    fn require_edit(&self, action: &str) -> Result<(), ApplicationError> {
        if self.can_edit {
            Ok(())
        } else {
            warn!(action, "Write refused without edit privilege");
            Err(ApplicationError::NotAuthorized(action.to_string()))
        }
    }

    /// Create an approved event
    #[instrument(skip(self, event), fields(date = %event.date_key, title = %event.title))]
    pub async fn create_event(&self, event: EventRecord) -> Result<EventRecord, ApplicationError> {
        self.require_edit("create events")?;
        let stored = self
            .writer
            .create_event(event.with_status(EventStatus::Approved))
            .await?;
        self.cache.invalidate(stored.date_key);
        info!(id = %stored.id, "Event created");
        Ok(stored)
    }

    /// Submit an event for approval; no privilege needed
    #[instrument(skip(self, event), fields(date = %event.date_key, title = %event.title))]
    pub async fn submit_event(&self, event: EventRecord) -> Result<EventRecord, ApplicationError> {
        let stored = self
            .writer
            .create_event(event.with_status(EventStatus::Pending))
            .await?;
        self.cache.invalidate(stored.date_key);
        info!(id = %stored.id, "Event submitted for approval");
        Ok(stored)
    }

    /// Replace an event, invalidating both its old and new day
    #[instrument(skip(self, event), fields(id = %event.id))]
    pub async fn update_event(&self, event: EventRecord) -> Result<EventRecord, ApplicationError> {
        self.require_edit("edit events")?;
        let updated = self.writer.update_event(event).await?;
        self.cache.invalidate(updated.previous_date);
        if updated.event.date_key != updated.previous_date {
            self.cache.invalidate(updated.event.date_key);
        }
        info!(
            from = %updated.previous_date,
            to = %updated.event.date_key,
            "Event updated"
        );
        Ok(updated.event)
    }

    /// Approve a pending event
    #[instrument(skip(self))]
    pub async fn approve_event(&self, id: &EventId) -> Result<EventRecord, ApplicationError> {
        self.require_edit("approve events")?;
        let approved = self.writer.approve_event(id).await?;
        self.cache.invalidate(approved.date_key);
        info!(date = %approved.date_key, "Event approved");
        Ok(approved)
    }

    /// Delete an event, returning the day it was on
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &EventId) -> Result<DateKey, ApplicationError> {
        self.require_edit("delete events")?;
        let deleted = self.writer.delete_event(id).await?;
        self.cache.invalidate(deleted.date_key);
        info!(date = %deleted.date_key, "Event deleted");
        Ok(deleted.date_key)
    }
}
