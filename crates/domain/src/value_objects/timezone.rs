//! Parish time zone value object
//!
//! "Today" on the calendar is the parish's local date, not the UTC date.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::DateKey;
use crate::errors::DomainError;

/// A validated IANA time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA name such as `America/Sao_Paulo`
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::ValidationError(format!("Unknown time zone: {name}")))
    }

    /// The IANA name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }

    /// Underlying chrono-tz zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Check if this is a UTC timezone
    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.as_str(), "UTC" | "Etc/UTC" | "Etc/GMT")
    }

    /// Local calendar day for an instant
    #[must_use]
    pub fn local_date_key(&self, instant: DateTime<Utc>) -> DateKey {
        DateKey::from(instant.with_timezone(&self.0).date_naive())
    }

    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }

    #[must_use]
    pub const fn sao_paulo() -> Self {
        Self(Tz::America__Sao_Paulo)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::sao_paulo()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timezone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timezone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
