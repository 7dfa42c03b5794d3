//! Exchange rate and charges providers.
//!
//! Two variants implement each port from `payments-model`:
//!
//! - **Fixed** responders return deterministic quotes (rate 2.0, a 10.0 base
//!   fee). They never fail and stand in for the downstream services during
//!   development and testing.
//! - **HTTP** clients call a real quote service. Every call goes through a
//!   [`ResiliencePolicy`]: a per-attempt timeout, bounded retries with
//!   exponential backoff, and a circuit breaker that fails fast after a run
//!   of failures.
//!
//! # Example
//! ```
//! use fx_charges::{QuoteMode, QuoteProviders, QuoteSettings};
//!
//! let providers = QuoteProviders::from_settings(&QuoteSettings::default()).unwrap();
//! assert_eq!(QuoteSettings::default().mode, QuoteMode::Fixed);
//! # drop(providers);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use payments_model::{ChargesProvider, ExchangeRateProvider};

mod fixed;
mod http;
mod resilience;

pub use fixed::{
    FIXED_CONTRACT_REFERENCE, FIXED_EXCHANGE_RATE, FIXED_RECEIVER_CHARGE, FIXED_SENDER_CHARGE,
    FixedChargesProvider, FixedRateProvider,
};
pub use http::{ChargesQuoteRequest, HttpChargesProvider, HttpRateProvider, RateQuoteRequest};
pub use resilience::{CircuitBreaker, ResiliencePolicy};

/// Error type for provider configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Unknown quote mode: {0} (expected `fixed` or `http`)")]
    UnknownMode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Which provider variant to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteMode {
    #[default]
    Fixed,
    Http,
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteMode::Fixed => f.write_str("fixed"),
            QuoteMode::Http => f.write_str("http"),
        }
    }
}

impl FromStr for QuoteMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(QuoteMode::Fixed),
            "http" => Ok(QuoteMode::Http),
            other => Err(SettingsError::UnknownMode(other.to_string())),
        }
    }
}

/// Provider configuration.
#[derive(Debug, Clone)]
pub struct QuoteSettings {
    pub mode: QuoteMode,
    pub fx_url: String,
    pub charges_url: String,
    /// Per-attempt timeout for HTTP calls
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            mode: QuoteMode::Fixed,
            fx_url: "http://localhost:9090/fx".to_string(),
            charges_url: "http://localhost:9090/ch".to_string(),
            timeout: Duration::from_millis(2000),
            max_retries: 2,
        }
    }
}

/// The pair of providers handed to the payment service.
#[derive(Clone)]
pub struct QuoteProviders {
    pub fx: Arc<dyn ExchangeRateProvider>,
    pub charges: Arc<dyn ChargesProvider>,
}

impl QuoteProviders {
    /// Fixed responders for both ports.
    pub fn fixed() -> Self {
        Self {
            fx: Arc::new(FixedRateProvider::new()),
            charges: Arc::new(FixedChargesProvider::new()),
        }
    }

    /// Builds the providers selected by `settings.mode`.
    pub fn from_settings(settings: &QuoteSettings) -> Result<Self, SettingsError> {
        match settings.mode {
            QuoteMode::Fixed => Ok(Self::fixed()),
            QuoteMode::Http => {
                let client = reqwest::Client::builder()
                    .timeout(settings.timeout)
                    .build()?;
                let policy = || ResiliencePolicy::new(settings.timeout, settings.max_retries);
                Ok(Self {
                    fx: Arc::new(HttpRateProvider::new(
                        client.clone(),
                        settings.fx_url.clone(),
                        policy(),
                    )),
                    charges: Arc::new(HttpChargesProvider::new(
                        client,
                        settings.charges_url.clone(),
                        policy(),
                    )),
                })
            }
        }
    }
}
