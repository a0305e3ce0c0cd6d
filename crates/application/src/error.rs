//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::EventSourceError;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Event store failure
    #[error(transparent)]
    EventSource(#[from] EventSourceError),

    /// User not authorized
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if retrying by hand may help
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::EventSource(err) => err.is_transient(),
            _ => false,
        }
    }

    /// Message suitable for showing to parish staff
    pub fn user_message(&self) -> String {
        match self {
            Self::EventSource(err) => err.user_message().to_string(),
            Self::NotAuthorized(_) => {
                EventSourceError::Permission(String::new()).user_message().to_string()
            },
            other => other.to_string(),
        }
    }
}
