//! Fixed-value quote responders.

use async_trait::async_trait;

use payments_model::{
    Charge, ChargesInformation, ChargesProvider, ExchangeRateProvider, ForeignExchange, QuoteError,
};

pub const FIXED_EXCHANGE_RATE: f64 = 2.0;
pub const FIXED_CONTRACT_REFERENCE: &str = "FX123";
/// Base fee charged in the sender currency
pub const FIXED_SENDER_CHARGE: f64 = 10.0;
pub const FIXED_RECEIVER_CHARGE: f64 = 1.0;

/// Rate lookup that always quotes [`FIXED_EXCHANGE_RATE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRateProvider;

impl FixedRateProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExchangeRateProvider for FixedRateProvider {
    async fn get_rate(
        &self,
        target_currency: &str,
        _source_currency: &str,
        amount: f64,
    ) -> Result<ForeignExchange, QuoteError> {
        Ok(ForeignExchange {
            contract_reference: FIXED_CONTRACT_REFERENCE.to_string(),
            exchange_rate: FIXED_EXCHANGE_RATE,
            original_amount: amount,
            original_currency: target_currency.to_string(),
        })
    }
}

/// Fee calculation with a fixed base fee.
///
/// Sender charges are the base fee in the sender currency followed by the
/// same fee converted at `exchange_rate` into the receiver currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedChargesProvider;

impl FixedChargesProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChargesProvider for FixedChargesProvider {
    async fn get_charges(
        &self,
        exchange_rate: f64,
        bearer_code: &str,
        sender_currency: &str,
        receiver_currency: &str,
    ) -> Result<ChargesInformation, QuoteError> {
        Ok(ChargesInformation {
            bearer_code: bearer_code.to_string(),
            sender_charges: vec![
                Charge::new(FIXED_SENDER_CHARGE, sender_currency),
                Charge::new(FIXED_SENDER_CHARGE / exchange_rate, receiver_currency),
            ],
            receiver_charges_amount: FIXED_RECEIVER_CHARGE,
            receiver_charges_currency: receiver_currency.to_string(),
        })
    }
}
