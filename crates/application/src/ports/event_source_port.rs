//! Event source port
//!
//! Read access to the remote event store. Transport failures are reported as
//! [`EventSourceError`] and never retried automatically.

use async_trait::async_trait;
use domain::{DateKey, EventRecord, YearMonth};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Failure reported by the event store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventSourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl EventSourceError {
    /// Stable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Timeout => "NETWORK_ERROR",
            Self::Auth(_) => "AUTH_ERROR",
            Self::Permission(_) => "PERMISSION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Duplicate(_) => "DUPLICATE",
            Self::Database(_) => "DB_ERROR",
            Self::Server(_) => "SERVER_ERROR",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Message suitable for showing to parish staff
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Timeout => {
                "Erro de conexão. Verifique sua internet e tente novamente."
            },
            Self::Auth(_) => "Sessão expirada. Faça login novamente.",
            Self::Permission(_) => "Você não tem permissão para realizar esta ação.",
            Self::NotFound(_) => "Dados não encontrados.",
            Self::Duplicate(_) => "Este registro já existe no sistema.",
            Self::Database(_) => "Erro ao processar dados. Tente novamente.",
            Self::Server(_) => "Erro no servidor. Aguarde alguns instantes e tente novamente.",
            Self::Unknown(_) => "Erro inesperado. Se persistir, contate o suporte.",
        }
    }

    /// Whether a manual retry is likely to succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout | Self::Server(_))
    }

    /// Whether administrators should be notified
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Server(_))
    }
}

/// Read side of the parish event store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventSourcePort: Send + Sync {
    /// Events dated between `start` and `end`, both inclusive
    async fn fetch_events_between(
        &self,
        start: DateKey,
        end: DateKey,
    ) -> Result<Vec<EventRecord>, EventSourceError>;

    /// Events of one month
    async fn fetch_events(&self, month: YearMonth) -> Result<Vec<EventRecord>, EventSourceError> {
        self.fetch_events_between(month.first_day(), month.last_day())
            .await
    }

    /// Events of a single day
    async fn fetch_events_for_day(
        &self,
        date: DateKey,
    ) -> Result<Vec<EventRecord>, EventSourceError> {
        self.fetch_events_between(date, date).await
    }
}
