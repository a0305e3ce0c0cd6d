//! Wiring of adapters and services for one CLI invocation

use std::{fmt, path::Path, sync::Arc};

use anyhow::Context;
use application::{
    AgendaService, CalendarService, ClockPort, DayPanelController, EventCache, MonthNavigator,
};
use chrono::{DateTime, Utc};
use domain::{DateKey, ViewportClass};
use infrastructure::{AppConfig, InMemoryEventStore, ManualClock, SystemClock};
use tracing::{debug, info};

/// Per-invocation overrides from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub events_path: Option<std::path::PathBuf>,
    pub today: Option<DateKey>,
    pub can_edit: bool,
    pub compact: bool,
}

/// Fully wired services
pub struct App {
    pub cache: Arc<EventCache>,
    pub calendar: CalendarService,
    pub panel: DayPanelController,
    pub agenda: AgendaService,
    pub navigator: MonthNavigator,
    pub viewport: ViewportClass,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("viewport", &self.viewport)
            .field("can_edit", &self.panel.can_edit())
            .finish_non_exhaustive()
    }
}

/// Instant used when `--today` pins the date: mid-afternoon UTC, which is the
/// same calendar day in every American and European zone
fn pinned_instant(today: DateKey) -> anyhow::Result<DateTime<Utc>> {
    let date = today
        .to_naive_date()
        .with_context(|| format!("date out of range: {today}"))?;
    let afternoon = date
        .and_hms_opt(15, 0, 0)
        .context("invalid time of day")?;
    Ok(afternoon.and_utc())
}

impl App {
    /// Build every service from configuration and overrides
    pub async fn build(config: &AppConfig, overrides: Overrides) -> anyhow::Result<Self> {
        let events_path = overrides
            .events_path
            .unwrap_or_else(|| config.store.events_path.clone());
        let store = Arc::new(open_store(&events_path).await?);

        let clock: Arc<dyn ClockPort> = match overrides.today {
            Some(today) => Arc::new(ManualClock::new(pinned_instant(today)?)),
            None => Arc::new(SystemClock),
        };

        let can_edit = overrides.can_edit || config.panel.can_edit;
        let viewport = if overrides.compact {
            ViewportClass::Compact
        } else {
            config.calendar.viewport
        };

        let cache = Arc::new(
            EventCache::new(store.clone(), Arc::clone(&clock)).with_ttl(config.cache.ttl()),
        );
        let calendar =
            CalendarService::new(store.clone()).with_trailing_filler(config.calendar.trailing_filler);
        let panel = DayPanelController::new(Arc::clone(&cache), can_edit);
        let agenda = AgendaService::new(store.clone(), Arc::clone(&cache), can_edit);

        let timezone = config.calendar.timezone;
        let navigator = match config.calendar.initial_year_month()? {
            Some(month) => MonthNavigator::new(month, Arc::clone(&clock), timezone),
            None => MonthNavigator::starting_today(Arc::clone(&clock), timezone),
        };

        info!(
            events = store.len(),
            can_edit,
            %viewport,
            month = %navigator.current(),
            "Calendar ready"
        );

        Ok(Self {
            cache,
            calendar,
            panel,
            agenda,
            navigator,
            viewport,
        })
    }

    /// Today's date in the parish time zone
    pub fn today(&self) -> DateKey {
        self.navigator.today_key()
    }
}

async fn open_store(path: &Path) -> anyhow::Result<InMemoryEventStore> {
    debug!(path = %path.display(), "Opening event store");
    InMemoryEventStore::open(path)
        .await
        .with_context(|| format!("failed to open event store {}", path.display()))
}

#[cfg(test)]
mod tests {
    use application::{PanelMode, PanelOutcome, PanelState};
    use domain::{EventId, EventKind, EventRecord, YearMonth};

    use super::*;

    fn overrides(dir: &tempfile::TempDir) -> Overrides {
        Overrides {
            events_path: Some(dir.path().join("events.json")),
            today: Some(DateKey::parse("2026-01-18").unwrap()),
            can_edit: true,
            compact: false,
        }
    }

    #[test]
    fn pinned_instant_stays_on_the_same_local_day() {
        let today = DateKey::parse("2026-01-18").unwrap();
        let instant = pinned_instant(today).unwrap();
        assert_eq!(domain::Timezone::sao_paulo().local_date_key(instant), today);
        assert_eq!(domain::Timezone::utc().local_date_key(instant), today);
    }

    #[tokio::test]
    async fn build_starts_at_pinned_month() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::build(&AppConfig::default(), overrides(&dir))
            .await
            .unwrap();

        assert_eq!(app.navigator.current(), YearMonth::new(2026, 1).unwrap());
        assert_eq!(app.today().to_string(), "2026-01-18");
        assert_eq!(app.cache.stats().entries, 0);
        assert!(app.panel.can_edit());
    }

    #[tokio::test]
    async fn created_event_shows_in_panel() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::build(&AppConfig::default(), overrides(&dir))
            .await
            .unwrap();
        let day = app.today();

        let event =
            EventRecord::new(EventId::new("e1"), day, EventKind::Meeting, "Conselho").unwrap();
        app.agenda.create_event(event).await.unwrap();

        let PanelOutcome::Applied(PanelState::Viewing(data)) =
            app.panel.open(day, PanelMode::View).await
        else {
            panic!("expected viewing state");
        };
        assert_eq!(data.events.len(), 1);
        assert_eq!(data.events[0].title, "Conselho");
    }

    #[tokio::test]
    async fn config_can_edit_applies_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.panel.can_edit = true;
        let app = App::build(
            &config,
            Overrides {
                can_edit: false,
                ..overrides(&dir)
            },
        )
        .await
        .unwrap();
        assert!(app.panel.can_edit());
    }
}
