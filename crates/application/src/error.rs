//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The requested place could not be resolved; the message is user-facing
    #[error("{0}")]
    NotFound(String),

    /// Transport or HTTP failure talking to an upstream service
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Upstream answered successfully but the payload was unusable
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Caller supplied missing or invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Domain rule violations come from caller-supplied values
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl ApplicationError {
    /// Whether the failure originated at an upstream service
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::MalformedResponse(_))
    }

    /// Whether the caller can fix the failure by changing the request
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidInput(_))
    }
}
