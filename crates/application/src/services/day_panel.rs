//! Day panel controller
//!
//! Drives the day-detail panel through `Idle`, `Loading`, `Viewing`, `Editing`
//! and `Error`. Every open or toggle is tagged with a request number; a
//! resolution whose number is no longer current is discarded, so the panel
//! never shows a day the user has already navigated away from.

use std::{fmt, sync::Arc};

use domain::{
    CategoryClassifier, DEFAULT_SEASON, DateKey, DayHeader, DayPresentation, EventRecord,
    HexColor, ViewportClass,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    ports::EventSourceError,
    services::event_cache::{DayEvents, EventCache},
};

/// Whether the panel shows or edits a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    #[default]
    View,
    Edit,
}

impl PanelMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::View => Self::Edit,
            Self::Edit => Self::View,
        }
    }
}

/// Everything the panel needs to draw a resolved day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelData {
    pub date_key: DateKey,
    pub header: DayHeader,
    pub events: DayEvents,
    /// Liturgical color of the day, green when none is set
    pub accent: HexColor,
    pub season: String,
    pub presentation: DayPresentation,
    /// Whether the view/edit switch is offered
    pub can_toggle: bool,
    /// Whether the "add event" affordance is offered
    pub can_create: bool,
}

impl PanelData {
    /// The day has no events; the panel shows its "no events" message
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// State of the day panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Loading {
        date_key: DateKey,
        mode: PanelMode,
    },
    Viewing(PanelData),
    Editing(PanelData),
    Error {
        date_key: DateKey,
        mode: PanelMode,
        reason: EventSourceError,
    },
}

impl PanelState {
    /// Day the panel is showing or loading
    #[must_use]
    pub const fn date_key(&self) -> Option<DateKey> {
        match self {
            Self::Idle => None,
            Self::Loading { date_key, .. } | Self::Error { date_key, .. } => Some(*date_key),
            Self::Viewing(data) | Self::Editing(data) => Some(data.date_key),
        }
    }

    #[must_use]
    pub const fn data(&self) -> Option<&PanelData> {
        match self {
            Self::Viewing(data) | Self::Editing(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Result of a panel operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    /// The panel moved to this state
    Applied(PanelState),
    /// The operation was not permitted or had nothing to do
    Unchanged,
    /// A newer operation superseded this one; its result was dropped
    Discarded,
}

#[derive(Default)]
struct PanelInner {
    state: PanelState,
    request: u64,
}

/// Controller for the day-detail panel of one calendar
pub struct DayPanelController {
    cache: Arc<EventCache>,
    classifier: CategoryClassifier,
    can_edit: bool,
    inner: Mutex<PanelInner>,
}

impl fmt::Debug for DayPanelController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayPanelController")
            .field("can_edit", &self.can_edit)
            .finish_non_exhaustive()
    }
}

impl DayPanelController {
    /// Create a controller; `can_edit` is the user's edit privilege
    pub fn new(cache: Arc<EventCache>, can_edit: bool) -> Self {
        Self {
            cache,
            classifier: CategoryClassifier::new(),
            can_edit,
            inner: Mutex::new(PanelInner::default()),
        }
    }

    #[must_use]
    pub const fn can_edit(&self) -> bool {
        self.can_edit
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.inner.lock().state.clone()
    }

    /// Open a day, superseding whatever the panel was doing
    ///
    /// Edit mode without edit privilege opens in view mode.
    #[instrument(skip(self), fields(date = %date_key))]
    pub async fn open(&self, date_key: DateKey, mode: PanelMode) -> PanelOutcome {
        let mode = if mode == PanelMode::Edit && !self.can_edit {
            warn!("Edit requested without privilege, opening in view mode");
            PanelMode::View
        } else {
            mode
        };
        let request = self.begin_loading(date_key, mode);
        info!(request, ?mode, "Opening day panel");
        self.resolve(request, date_key, mode).await
    }

    /// Switch between view and edit, reloading the day through the cache
    #[instrument(skip(self))]
    pub async fn toggle_mode(&self) -> PanelOutcome {
        if !self.can_edit {
            warn!("Mode toggle refused without edit privilege");
            return PanelOutcome::Unchanged;
        }

        let (date_key, current) = {
            let inner = self.inner.lock();
            match &inner.state {
                PanelState::Viewing(data) => (data.date_key, PanelMode::View),
                PanelState::Editing(data) => (data.date_key, PanelMode::Edit),
                _ => {
                    debug!("Nothing to toggle");
                    return PanelOutcome::Unchanged;
                },
            }
        };
        let mode = current.toggled();
        let request = self.begin_loading(date_key, mode);
        self.resolve(request, date_key, mode).await
    }

    /// Load the failed day again in the mode it was opened with
    #[instrument(skip(self))]
    pub async fn retry(&self) -> PanelOutcome {
        let failed = match &self.inner.lock().state {
            PanelState::Error { date_key, mode, .. } => Some((*date_key, *mode)),
            _ => None,
        };
        match failed {
            Some((date_key, mode)) => self.open(date_key, mode).await,
            None => PanelOutcome::Unchanged,
        }
    }

    /// Close the panel; cached events are kept
    #[instrument(skip(self))]
    pub fn close(&self) -> PanelOutcome {
        let mut inner = self.inner.lock();
        inner.request += 1;
        inner.state = PanelState::Idle;
        debug!("Day panel closed");
        PanelOutcome::Applied(PanelState::Idle)
    }

    fn begin_loading(&self, date_key: DateKey, mode: PanelMode) -> u64 {
        let mut inner = self.inner.lock();
        inner.request += 1;
        inner.state = PanelState::Loading { date_key, mode };
        inner.request
    }

    async fn resolve(&self, request: u64, date_key: DateKey, mode: PanelMode) -> PanelOutcome {
        let result = self.cache.get(date_key).await;

        let mut inner = self.inner.lock();
        if inner.request != request {
            debug!(request, current = inner.request, "Discarding stale panel resolution");
            return PanelOutcome::Discarded;
        }
        inner.state = match result {
            Ok(events) => {
                let data = self.panel_data(date_key, mode, events);
                match mode {
                    PanelMode::View => PanelState::Viewing(data),
                    PanelMode::Edit => PanelState::Editing(data),
                }
            },
            Err(reason) => {
                warn!(error = %reason, "Day panel failed to load");
                PanelState::Error {
                    date_key,
                    mode,
                    reason,
                }
            },
        };
        PanelOutcome::Applied(inner.state.clone())
    }

    fn panel_data(&self, date_key: DateKey, mode: PanelMode, events: DayEvents) -> PanelData {
        let season = events
            .iter()
            .map(EventRecord::season_label)
            .find(|season| *season != DEFAULT_SEASON)
            .unwrap_or(DEFAULT_SEASON)
            .to_string();
        PanelData {
            date_key,
            header: DayHeader::for_date(&date_key),
            accent: self.classifier.accent_color(&events),
            season,
            presentation: self.classifier.present(&events, ViewportClass::Full),
            can_toggle: self.can_edit,
            can_create: self.can_edit && (events.is_empty() || mode == PanelMode::Edit),
            events,
        }
    }
}
