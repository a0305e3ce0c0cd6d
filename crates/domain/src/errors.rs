//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Date key is not a real `YYYY-MM-DD` date
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    /// Month outside 1-12
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u8),

    /// Color code is not a `#rgb` / `#rrggbb` hex value
    #[error("Invalid color code: {0}")]
    InvalidColor(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Event", "evt-1");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Event");
                assert_eq!(id, "evt-1");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("Event", "evt-1");
        assert_eq!(err.to_string(), "Event not found: evt-1");
    }

    #[test]
    fn invalid_date_key_message() {
        let err = DomainError::InvalidDateKey("2026-02-30".to_string());
        assert_eq!(err.to_string(), "Invalid date key: 2026-02-30");
    }

    #[test]
    fn invalid_month_message() {
        let err = DomainError::InvalidMonth(13);
        assert_eq!(err.to_string(), "Invalid month: 13 (expected 1-12)");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("title is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: title is required");
    }
}
