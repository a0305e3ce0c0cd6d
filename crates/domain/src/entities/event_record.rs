//! Event record entity - a read-only copy of an event owned by the parish store

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{DateKey, EventId, EventKind},
};

/// Season label shown when an event carries none
pub const DEFAULT_SEASON: &str = "Tempo Comum";

/// Approval state of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Submitted, waiting for an administrator
    Pending,
    /// Visible on the public calendar
    #[default]
    Approved,
}

impl EventStatus {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Approved => "Aprovado",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A mass celebration attached to a liturgy event, with its ministry roster
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MassSchedule {
    #[serde(default, with = "time_of_day", skip_serializing_if = "Option::is_none")]
    pub celebration_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celebrant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choir_team: Option<String>,
    /// Extraordinary ministers of Holy Communion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mep_team: Option<String>,
}

impl MassSchedule {
    #[must_use]
    pub const fn at(time: NaiveTime) -> Self {
        Self {
            celebration_time: Some(time),
            celebrant: None,
            reading_team: None,
            choir_team: None,
            mep_team: None,
        }
    }
}

/// A single event on the parish calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub date_key: DateKey,
    pub kind: EventKind,
    pub title: String,
    #[serde(default, with = "time_of_day", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    /// Liturgical color code, only meaningful for liturgy events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liturgical_season: Option<String>,
    #[serde(default)]
    pub is_solemnity: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedules: Vec<MassSchedule>,
}

impl EventRecord {
    /// Create an approved event with only the required fields
    pub fn new(
        id: EventId,
        date_key: DateKey,
        kind: EventKind,
        title: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "event title is required".to_string(),
            ));
        }
        Ok(Self {
            id,
            date_key,
            kind,
            title,
            start_time: None,
            color_hint: None,
            liturgical_season: None,
            is_solemnity: false,
            location: None,
            description: None,
            status: EventStatus::Approved,
            schedules: Vec::new(),
        })
    }

    #[must_use]
    pub const fn with_start_time(mut self, time: NaiveTime) -> Self {
        self.start_time = Some(time);
        self
    }

    #[must_use]
    pub fn with_color_hint(mut self, color: impl Into<String>) -> Self {
        self.color_hint = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.liturgical_season = Some(season.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: MassSchedule) -> Self {
        self.schedules.push(schedule);
        self
    }

    #[must_use]
    pub const fn solemnity(mut self) -> Self {
        self.is_solemnity = true;
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// First available time of day: own start time, else the first scheduled mass
    #[must_use]
    pub fn effective_start_time(&self) -> Option<NaiveTime> {
        self.start_time.or_else(|| {
            self.schedules
                .iter()
                .find_map(|schedule| schedule.celebration_time)
        })
    }

    /// Liturgical season, or the ordinary-time default
    #[must_use]
    pub fn season_label(&self) -> &str {
        self.liturgical_season
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SEASON)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, EventStatus::Pending)
    }

    /// Mark the event approved
    pub const fn approve(&mut self) {
        self.status = EventStatus::Approved;
    }
}

/// `HH:MM` display and `HH:MM[:SS]` parsing for optional times of day
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::errors::DomainError;

    /// Format as `HH:MM`
    #[must_use]
    pub fn format(time: NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }

    /// Parse `HH:MM:SS` or `HH:MM`
    pub fn parse(raw: &str) -> Result<NaiveTime, DomainError> {
        let trimmed = raw.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| DomainError::ValidationError(format!("Invalid time of day: {raw}")))
    }

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&format(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> DateKey {
        DateKey::new(2026, 1, 18).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn new_event_is_approved_with_defaults() {
        let event =
            EventRecord::new(EventId::new("1"), key(), EventKind::Meeting, "Conselho").unwrap();
        assert_eq!(event.status, EventStatus::Approved);
        assert!(!event.is_solemnity);
        assert!(event.schedules.is_empty());
        assert_eq!(event.season_label(), DEFAULT_SEASON);
    }

    #[test]
    fn blank_title_is_rejected() {
        let result = EventRecord::new(EventId::new("1"), key(), EventKind::Meeting, "  ");
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn effective_start_time_falls_back_to_schedule() {
        let event = EventRecord::new(EventId::new("1"), key(), EventKind::Liturgy, "Missa")
            .unwrap()
            .with_schedule(MassSchedule::default())
            .with_schedule(MassSchedule::at(time(19, 30)));
        assert_eq!(event.effective_start_time(), Some(time(19, 30)));

        let event = event.with_start_time(time(7, 0));
        assert_eq!(event.effective_start_time(), Some(time(7, 0)));
    }

    #[test]
    fn approve_clears_pending() {
        let mut event = EventRecord::new(EventId::new("1"), key(), EventKind::SocialEvent, "Festa")
            .unwrap()
            .with_status(EventStatus::Pending);
        assert!(event.is_pending());
        event.approve();
        assert!(!event.is_pending());
    }

    #[test]
    fn deserializes_minimal_store_record() {
        let json = r##"{
            "id": "ev-9",
            "date_key": "2026-01-18",
            "kind": "liturgia",
            "title": "Missa do 2º Domingo",
            "start_time": "08:00:00",
            "color_hint": "#FFFFFF",
            "schedules": [{"celebration_time": "19:00", "celebrant": "Pe. João"}]
        }"##;
        let event: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::Liturgy);
        assert_eq!(event.start_time, Some(time(8, 0)));
        assert_eq!(event.status, EventStatus::Approved);
        assert_eq!(event.schedules[0].celebration_time, Some(time(19, 0)));
        assert_eq!(event.schedules[0].celebrant.as_deref(), Some("Pe. João"));
    }

    #[test]
    fn serializes_times_as_hours_and_minutes() {
        let event = EventRecord::new(EventId::new("1"), key(), EventKind::Meeting, "Conselho")
            .unwrap()
            .with_start_time(time(20, 15));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["start_time"], "20:15");
        assert_eq!(value["date_key"], "2026-01-18");
        assert_eq!(value["status"], "approved");
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(time_of_day::parse("25:00").is_err());
        assert!(time_of_day::parse("noon").is_err());
        assert_eq!(time_of_day::parse(" 09:05 ").unwrap(), time(9, 5));
        assert_eq!(time_of_day::format(time(9, 5)), "09:05");
    }
}
