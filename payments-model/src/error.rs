//! Error types for the payment records service.

use crate::ports::QuoteError;

/// Domain-level errors (invalid input).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid payment id: {0}")]
    InvalidPaymentId(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Store-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Document not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Stored document is unreadable: {0}")]
    Corrupt(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// `None` is reported with an empty body.
    #[error("Not found")]
    NotFound(Option<String>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Failed to obtain quote: {0}")]
    Upstream(#[from] QuoteError),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidPaymentId(_) => AppError::NotFound(None),
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound(None),
            StoreError::Conflict(e) => AppError::Internal(e),
            StoreError::Database(e) => AppError::Internal(e),
            StoreError::Corrupt(e) => AppError::Internal(e),
        }
    }
}
