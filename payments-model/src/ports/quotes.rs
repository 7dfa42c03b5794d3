//! Quote provider ports.
//!
//! Rate lookup and fee calculation are downstream services. Implementations
//! can be HTTP clients, fixed responders, etc.

use crate::domain::{ChargesInformation, ForeignExchange};

/// Error type for quote operations.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Quote service unavailable: {0}")]
    Unavailable(String),

    #[error("Quote service timed out")]
    Timeout,

    #[error("Invalid quote response: {0}")]
    InvalidResponse(String),

    #[error("Quote rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl QuoteError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            QuoteError::Unavailable(_) | QuoteError::Timeout => true,
            QuoteError::Rejected { status, .. } => *status >= 500,
            QuoteError::InvalidResponse(_) => false,
        }
    }
}

/// Port trait for exchange rate lookups.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Quotes the rate for converting `amount` between the two currencies.
    ///
    /// The returned record's `original_amount` and `original_currency`
    /// describe the amount before conversion.
    async fn get_rate(
        &self,
        target_currency: &str,
        source_currency: &str,
        amount: f64,
    ) -> Result<ForeignExchange, QuoteError>;
}

/// Port trait for fee calculation.
#[async_trait::async_trait]
pub trait ChargesProvider: Send + Sync + 'static {
    async fn get_charges(
        &self,
        exchange_rate: f64,
        bearer_code: &str,
        sender_currency: &str,
        receiver_currency: &str,
    ) -> Result<ChargesInformation, QuoteError>;
}
