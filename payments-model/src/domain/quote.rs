//! Foreign-exchange and charges records attached to every payment.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A rate quotation used to convert the requested amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForeignExchange {
    #[serde(default)]
    #[schema(example = "FX123")]
    pub contract_reference: String,
    #[schema(example = 2.0)]
    pub exchange_rate: f64,
    #[serde(default)]
    pub original_amount: f64,
    #[serde(default)]
    pub original_currency: String,
}

impl ForeignExchange {
    /// Rate used when no conversion is needed.
    pub fn identity() -> Self {
        Self {
            contract_reference: String::new(),
            exchange_rate: 1.0,
            original_amount: 0.0,
            original_currency: String::new(),
        }
    }

    /// Returns true if the rate can be divided by.
    pub fn is_usable(&self) -> bool {
        self.exchange_rate.is_finite() && self.exchange_rate > 0.0
    }

    /// Converts a requested amount at this rate.
    pub fn convert(&self, requested: f64) -> f64 {
        requested / self.exchange_rate
    }
}

impl Default for ForeignExchange {
    fn default() -> Self {
        Self::identity()
    }
}

/// A single fee leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Charge {
    #[schema(example = 10.0)]
    pub amount: f64,
    #[schema(example = "USD")]
    pub currency: String,
}

impl Charge {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Fee breakdown for a payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChargesInformation {
    /// Which party bears the charges (`SHAR`, `DEBT`, `CRED`)
    #[schema(example = "SHAR")]
    pub bearer_code: String,
    pub sender_charges: Vec<Charge>,
    pub receiver_charges_amount: f64,
    pub receiver_charges_currency: String,
}
