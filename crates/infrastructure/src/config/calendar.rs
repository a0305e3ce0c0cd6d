//! Calendar view and day panel settings

use domain::{DomainError, Timezone, ViewportClass, YearMonth};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Calendar view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Parish time zone; decides what "today" is
    #[serde(default)]
    pub timezone: Timezone,

    /// Month shown at startup; both must be set, otherwise today's month is used
    #[serde(default)]
    pub initial_year: Option<i32>,
    #[serde(default)]
    pub initial_month: Option<u8>,

    /// Dots ("compact") or pills ("full") in grid cells
    #[serde(default)]
    pub viewport: ViewportClass,

    /// Pad the grid to whole weeks with next-month cells
    #[serde(default = "default_true")]
    pub trailing_filler: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: Timezone::default(),
            initial_year: None,
            initial_month: None,
            viewport: ViewportClass::default(),
            trailing_filler: true,
        }
    }
}

impl CalendarConfig {
    /// Configured start month, `None` to start at today's month
    pub fn initial_year_month(&self) -> Result<Option<YearMonth>, DomainError> {
        match (self.initial_year, self.initial_month) {
            (Some(year), Some(month)) => YearMonth::new(year, month).map(Some),
            (None, None) => Ok(None),
            _ => Err(DomainError::ValidationError(
                "initial_year and initial_month must be set together".to_string(),
            )),
        }
    }
}

/// Day panel configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Whether the user may edit events (switch to edit mode, create, approve)
    #[serde(default)]
    pub can_edit: bool,
}
