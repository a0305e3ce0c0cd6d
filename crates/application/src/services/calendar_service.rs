//! Calendar service
//!
//! Renders a month: fetches its events once, groups them by day and pairs
//! each grid cell with its presentation. Also computes the weekly load chart.

use std::{fmt, sync::Arc};

use domain::{
    CategoryClassifier, DateKey, DayAggregate, DayCell, DayPresentation, MonthGrid, ViewportClass,
    WeeklyLoad, YearMonth,
};
use tracing::{debug, info, instrument};

use crate::{error::ApplicationError, ports::EventSourcePort};

/// A grid cell with what to draw in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub cell: DayCell,
    /// `Empty` for filler cells and days without events
    pub presentation: DayPresentation,
}

/// A fully rendered month
#[derive(Debug, Clone)]
pub struct MonthView {
    pub year_month: YearMonth,
    /// "Janeiro 2026"
    pub title: String,
    pub viewport: ViewportClass,
    pub cells: Vec<RenderedCell>,
    pub events: DayAggregate,
}

impl MonthView {
    /// Cells in rows of seven
    pub fn weeks(&self) -> impl Iterator<Item = &[RenderedCell]> {
        self.cells.chunks(7)
    }

    /// Rendered cell of a current-month day
    #[must_use]
    pub fn cell_for(&self, date_key: DateKey) -> Option<&RenderedCell> {
        self.cells
            .iter()
            .find(|rendered| rendered.cell.date_key() == Some(date_key))
    }

    /// Events waiting for approval this month
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.events
            .iter()
            .flat_map(|(_, events)| events)
            .filter(|event| event.is_pending())
            .count()
    }
}

/// Calendar service for month rendering
pub struct CalendarService {
    source: Arc<dyn EventSourcePort>,
    classifier: CategoryClassifier,
    trailing_filler: bool,
}

impl fmt::Debug for CalendarService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarService")
            .field("trailing_filler", &self.trailing_filler)
            .finish_non_exhaustive()
    }
}

impl CalendarService {
    /// Create a new calendar service
    pub fn new(source: Arc<dyn EventSourcePort>) -> Self {
        Self {
            source,
            classifier: CategoryClassifier::new(),
            trailing_filler: true,
        }
    }

    /// Whether grids are padded to whole weeks
    #[must_use]
    pub const fn with_trailing_filler(mut self, enabled: bool) -> Self {
        self.trailing_filler = enabled;
        self
    }

    /// Render one month
    ///
    /// # Errors
    ///
    /// Fails when the month's events cannot be fetched; no partial grid is returned.
    #[instrument(skip(self), fields(month = %year_month))]
    pub async fn render_month(
        &self,
        year_month: YearMonth,
        viewport: ViewportClass,
    ) -> Result<MonthView, ApplicationError> {
        info!("Rendering month");
        let events = self.source.fetch_events(year_month).await?;
        let aggregate = DayAggregate::from_events(events);
        debug!(
            events = aggregate.total_events(),
            days = aggregate.day_count(),
            "Month events grouped"
        );

        let grid = MonthGrid::new(year_month);
        let grid = if self.trailing_filler {
            grid.with_trailing_filler()
        } else {
            grid
        };

        let cells = grid
            .cells()
            .iter()
            .map(|cell| RenderedCell {
                cell: *cell,
                presentation: cell.date_key().map_or(DayPresentation::Empty, |key| {
                    self.classifier
                        .present(aggregate.events_for(&key), viewport)
                }),
            })
            .collect();

        Ok(MonthView {
            year_month,
            title: year_month.title_pt(),
            viewport,
            cells,
            events: aggregate,
        })
    }

    /// Event counts per weekday for the seven days starting at `from`
    ///
    /// # Errors
    ///
    /// Fails when the events cannot be fetched.
    #[instrument(skip(self), fields(from = %from))]
    pub async fn weekly_load(&self, from: DateKey) -> Result<WeeklyLoad, ApplicationError> {
        let until = from.plus_days(6);
        let events = self.source.fetch_events_between(from, until).await?;
        let load = WeeklyLoad::over_week(from, &events);
        debug!(total = load.total(), "Weekly load computed");
        Ok(load)
    }
}

#[cfg(test)]
mod tests {
    use domain::{EventKind, Weekday};

    use super::*;
    use crate::{
        ports::{EventSourceError, MockEventSourcePort},
        test_support::{FakeSource, event_on, key},
    };

    fn service(source: FakeSource) -> CalendarService {
        CalendarService::new(Arc::new(source))
    }

    #[tokio::test]
    async fn renders_january_2026() {
        let mut liturgy = event_on("l", "2026-01-18");
        liturgy.kind = EventKind::Liturgy;
        let source = FakeSource::with_events(vec![
            liturgy,
            event_on("m", "2026-01-18"),
            event_on("x", "2026-02-01"),
        ]);

        let view = service(source)
            .render_month(YearMonth::new(2026, 1).unwrap(), ViewportClass::Compact)
            .await
            .unwrap();

        assert_eq!(view.title, "Janeiro 2026");
        assert_eq!(view.cells.len(), 35);
        assert!(view.cells[..4].iter().all(|c| c.presentation.is_empty()));
        let sunday = view.cell_for(key("2026-01-18")).unwrap();
        assert_eq!(sunday.presentation.len(), 2);
        assert!(view.cell_for(key("2026-01-19")).unwrap().presentation.is_empty());
        // Only January was fetched
        assert_eq!(view.events.total_events(), 2);
    }

    #[tokio::test]
    async fn trailing_filler_can_be_disabled() {
        let view = service(FakeSource::default())
            .with_trailing_filler(false)
            .render_month(YearMonth::new(2026, 5).unwrap(), ViewportClass::Full)
            .await
            .unwrap();
        assert_eq!(view.cells.len(), 5 + 31);

        let view = service(FakeSource::default())
            .render_month(YearMonth::new(2026, 5).unwrap(), ViewportClass::Full)
            .await
            .unwrap();
        assert_eq!(view.cells.len(), 42);
        assert_eq!(view.weeks().count(), 6);
    }

    #[tokio::test]
    async fn fetch_failure_returns_error() {
        let mut source = MockEventSourcePort::new();
        source
            .expect_fetch_events()
            .returning(|_| Err(EventSourceError::Timeout));
        let service = CalendarService::new(Arc::new(source));

        let result = service
            .render_month(YearMonth::new(2026, 1).unwrap(), ViewportClass::Full)
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::EventSource(EventSourceError::Timeout))
        ));
    }

    #[tokio::test]
    async fn counts_pending_events() {
        let mut pending = event_on("p", "2026-01-10");
        pending.status = domain::EventStatus::Pending;
        let source = FakeSource::with_events(vec![pending, event_on("a", "2026-01-11")]);
        let view = service(source)
            .render_month(YearMonth::new(2026, 1).unwrap(), ViewportClass::Full)
            .await
            .unwrap();
        assert_eq!(view.pending_count(), 1);
    }

    #[tokio::test]
    async fn weekly_load_counts_next_seven_days() {
        let source = FakeSource::with_events(vec![
            event_on("a", "2026-01-18"),
            event_on("b", "2026-01-18"),
            event_on("c", "2026-01-22"),
            event_on("d", "2026-01-25"),
        ]);
        let load = service(source).weekly_load(key("2026-01-18")).await.unwrap();
        assert_eq!(load[Weekday::Sunday], 2);
        assert_eq!(load[Weekday::Thursday], 1);
        assert_eq!(load.total(), 3);
    }
}
