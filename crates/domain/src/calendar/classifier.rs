//! Event categories and day presentation
//!
//! Every kind maps to a category, including kinds this version does not know.
//! Liturgy takes its color from the liturgical calendar; other categories use
//! fixed colors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    entities::{EventRecord, time_of_day},
    errors::DomainError,
    value_objects::{EventId, EventKind, HexColor},
};

/// Time text for events without any time of day
pub const PLACEHOLDER_TIME: &str = "--:--";

/// Label of the secondary pill shown for each scheduled mass
pub const MASS_LABEL: &str = "Missa";

/// Where a category's color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSource {
    /// The event's liturgical color code
    Liturgical,
    Fixed(HexColor),
}

/// Display category of an event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    pub label: &'static str,
    pub icon: &'static str,
    pub color_source: ColorSource,
    /// Lower weights are shown first
    pub order_weight: u8,
}

impl Category {
    pub const LITURGY: Self = Self {
        label: "Liturgia",
        icon: "⛪",
        color_source: ColorSource::Liturgical,
        order_weight: 0,
    };
    pub const MEETING: Self = Self {
        label: "Reunião",
        icon: "👥",
        color_source: ColorSource::Fixed(HexColor::rgb(0x15, 0x65, 0xc0)),
        order_weight: 10,
    };
    pub const PASTORAL_VISIT: Self = Self {
        label: "Visita Pastoral",
        icon: "🏠",
        color_source: ColorSource::Fixed(HexColor::rgb(0x6a, 0x1b, 0x9a)),
        order_weight: 20,
    };
    pub const SOCIAL_EVENT: Self = Self {
        label: "Evento Social",
        icon: "🎉",
        color_source: ColorSource::Fixed(HexColor::rgb(0xef, 0x6c, 0x00)),
        order_weight: 30,
    };
    /// Fallback for unrecognized kinds
    pub const DEFAULT: Self = Self {
        label: "Outro",
        icon: "📌",
        color_source: ColorSource::Fixed(HexColor::rgb(0x9e, 0x9e, 0x9e)),
        order_weight: 90,
    };
}

/// Width class of the calendar viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Narrow screens: one dot per event
    Compact,
    /// Labeled pills with time of day
    #[default]
    Full,
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => f.write_str("compact"),
            Self::Full => f.write_str("full"),
        }
    }
}

impl FromStr for ViewportClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            other => Err(DomainError::ValidationError(format!(
                "Unknown viewport class: {other}"
            ))),
        }
    }
}

/// Colored indicator dot for compact viewports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub event_id: EventId,
    pub color: HexColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillRole {
    /// The event itself
    Event,
    /// A mass scheduled under a liturgy event
    Schedule,
}

/// Labeled pill for full viewports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pill {
    pub event_id: EventId,
    pub role: PillRole,
    pub icon: &'static str,
    pub label: String,
    pub time_text: String,
    pub color: HexColor,
    pub solemnity: bool,
}

impl fmt::Display for Pill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            PillRole::Event => write!(f, "{} {} {}", self.icon, self.time_text, self.label)?,
            PillRole::Schedule => f.write_str(&self.label)?,
        }
        if self.solemnity {
            f.write_str(" ★")?;
        }
        Ok(())
    }
}

/// How a day's events are drawn in a grid cell or panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "items", rename_all = "snake_case")]
pub enum DayPresentation {
    /// No events on this day
    Empty,
    Dots(Vec<Dot>),
    Pills(Vec<Pill>),
}

impl DayPresentation {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of drawn items
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Dots(dots) => dots.len(),
            Self::Pills(pills) => pills.len(),
        }
    }
}

/// Maps event kinds to categories and builds day presentations
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryClassifier;

impl CategoryClassifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Category for a kind; unknown kinds get [`Category::DEFAULT`]
    #[must_use]
    pub const fn classify(&self, kind: &EventKind) -> Category {
        match kind {
            EventKind::Liturgy => Category::LITURGY,
            EventKind::Meeting => Category::MEETING,
            EventKind::PastoralVisit => Category::PASTORAL_VISIT,
            EventKind::SocialEvent => Category::SOCIAL_EVENT,
            EventKind::Other(_) => Category::DEFAULT,
        }
    }

    /// Color of an event's dot or pill border
    #[must_use]
    pub fn indicator_color(&self, event: &EventRecord) -> HexColor {
        match self.classify(&event.kind).color_source {
            ColorSource::Fixed(color) => color,
            ColorSource::Liturgical => {
                liturgical_color(event).unwrap_or(HexColor::LIGHT_GRAY)
            },
        }
    }

    /// Accent color of the day panel: the first liturgy's color, or green
    #[must_use]
    pub fn accent_color(&self, events: &[EventRecord]) -> HexColor {
        events
            .iter()
            .find(|event| event.kind.is_liturgy())
            .and_then(liturgical_color)
            .unwrap_or(HexColor::LITURGICAL_GREEN)
    }

    /// `HH:MM` from the event's start time, its first scheduled mass, or a placeholder
    #[must_use]
    pub fn time_text(&self, event: &EventRecord) -> String {
        event
            .effective_start_time()
            .map_or_else(|| PLACEHOLDER_TIME.to_string(), time_of_day::format)
    }

    /// Events stably sorted by category weight, ties kept in fetch order
    #[must_use]
    pub fn ordered<'a>(&self, events: &'a [EventRecord]) -> Vec<(&'a EventRecord, Category)> {
        let mut ordered: Vec<_> = events
            .iter()
            .map(|event| (event, self.classify(&event.kind)))
            .collect();
        ordered.sort_by_key(|(_, category)| category.order_weight);
        ordered
    }

    /// Presentation of one day's events for a viewport
    #[must_use]
    pub fn present(&self, events: &[EventRecord], viewport: ViewportClass) -> DayPresentation {
        if events.is_empty() {
            return DayPresentation::Empty;
        }
        let ordered = self.ordered(events);
        match viewport {
            ViewportClass::Compact => DayPresentation::Dots(
                ordered
                    .into_iter()
                    .map(|(event, _)| Dot {
                        event_id: event.id.clone(),
                        color: self.indicator_color(event),
                    })
                    .collect(),
            ),
            ViewportClass::Full => {
                let mut pills = Vec::with_capacity(events.len());
                for (event, category) in ordered {
                    pills.push(Pill {
                        event_id: event.id.clone(),
                        role: PillRole::Event,
                        icon: category.icon,
                        label: event.title.clone(),
                        time_text: self.time_text(event),
                        color: self.indicator_color(event),
                        solemnity: event.is_solemnity,
                    });
                    if event.kind.is_liturgy() {
                        pills.extend(schedule_pills(event));
                    }
                }
                DayPresentation::Pills(pills)
            },
        }
    }
}

fn liturgical_color(event: &EventRecord) -> Option<HexColor> {
    event
        .color_hint
        .as_deref()
        .and_then(|code| HexColor::parse(code).ok())
        .map(HexColor::visible_on_light)
}

fn schedule_pills(event: &EventRecord) -> impl Iterator<Item = Pill> + '_ {
    event
        .schedules
        .iter()
        .filter_map(|schedule| schedule.celebration_time)
        .map(|time| {
            let time_text = time_of_day::format(time);
            Pill {
                event_id: event.id.clone(),
                role: PillRole::Schedule,
                icon: "",
                label: format!("{time_text} {MASS_LABEL}"),
                time_text,
                color: HexColor::LIGHT_GRAY,
                solemnity: false,
            }
        })
}
