//! Event kind value object
//!
//! The remote store tags every event with a free-form kind string. Known kinds
//! map to dedicated variants; anything else is kept verbatim in `Other` so it
//! still classifies (to the default category) and round-trips unchanged.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declared kind of a parish event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Mass or other liturgical celebration
    Liturgy,
    /// Pastoral council, group or committee meeting
    Meeting,
    /// Priest or minister visiting a household or hospital
    PastoralVisit,
    /// Festivities, fundraisers and other community events
    SocialEvent,
    /// A kind this version does not know about
    Other(String),
}

impl EventKind {
    /// Canonical wire name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Liturgy => "liturgy",
            Self::Meeting => "meeting",
            Self::PastoralVisit => "pastoral-visit",
            Self::SocialEvent => "social-event",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is a liturgical celebration
    #[must_use]
    pub const fn is_liturgy(&self) -> bool {
        matches!(self, Self::Liturgy)
    }

    /// Whether the kind was recognized
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Ok(match normalized.as_str() {
            "liturgy" | "liturgia" => Self::Liturgy,
            "meeting" | "reuniao" | "reunião" => Self::Meeting,
            "pastoral-visit" | "visita-pastoral" => Self::PastoralVisit,
            "social-event" | "evento-social" => Self::SocialEvent,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(kind) = raw.parse::<Self>();
        Ok(kind)
    }
}
