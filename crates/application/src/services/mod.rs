//! Application services - Use case implementations

mod agenda_service;
mod calendar_service;
mod day_panel;
mod event_cache;
mod month_navigator;

pub use agenda_service::AgendaService;
pub use calendar_service::{CalendarService, MonthView, RenderedCell};
pub use day_panel::{DayPanelController, PanelData, PanelMode, PanelOutcome, PanelState};
pub use event_cache::{CacheStats, DEFAULT_TTL, DayEvents, EventCache};
pub use month_navigator::MonthNavigator;
