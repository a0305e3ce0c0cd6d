//! Hex color value object for indicator and accent colors

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// An RGB color, always rendered as lower-case `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    /// Pure white, which disappears against the light calendar background
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Light gray used for indicators without a usable color
    pub const LIGHT_GRAY: Self = Self::rgb(0xcc, 0xcc, 0xcc);

    /// Liturgical green, the accent used when a liturgy has no color code
    pub const LITURGICAL_GREEN: Self = Self::rgb(0x2e, 0x7d, 0x32);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb`, or the same without `#` (case and whitespace tolerant)
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidColor(s.to_string());
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            },
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Replace pure white with light gray so it stays visible
    #[must_use]
    pub fn visible_on_light(self) -> Self {
        if self == Self::WHITE {
            Self::LIGHT_GRAY
        } else {
            self
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(HexColor::parse("#2E7D32").unwrap().to_string(), "#2e7d32");
        assert_eq!(HexColor::parse("fff").unwrap(), HexColor::WHITE);
        assert_eq!(HexColor::parse(" #ccc ").unwrap(), HexColor::LIGHT_GRAY);
    }

    #[test]
    fn rejects_garbage() {
        assert!(HexColor::parse("#12345").is_err());
        assert!(HexColor::parse("#gggggg").is_err());
        assert!(HexColor::parse("Verde").is_err());
        assert!(HexColor::parse("").is_err());
    }

    #[test]
    fn white_is_replaced_by_gray() {
        assert_eq!(HexColor::WHITE.visible_on_light(), HexColor::LIGHT_GRAY);
        let red = HexColor::rgb(0xc8, 0x20, 0x38);
        assert_eq!(red.visible_on_light(), red);
    }
}
