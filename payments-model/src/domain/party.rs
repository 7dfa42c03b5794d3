//! Account-holder details embedded in a payment.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account-holder details for the beneficiary or debtor of a payment.
///
/// Embedded by value; a party has no identity of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Party {
    #[schema(example = "W Owens")]
    pub account_name: String,
    #[schema(example = "31926819")]
    pub account_number: String,
    /// Account number scheme, e.g. `BBAN` or `IBAN`
    #[schema(example = "BBAN")]
    pub account_number_code: String,
    pub account_type: i32,
    #[schema(example = "1 The Beneficiary Localtown SE2")]
    pub address: String,
    #[schema(example = "403000")]
    pub bank_id: String,
    #[schema(example = "GBDSC")]
    pub bank_id_code: String,
    #[schema(example = "Wilfred Jeremiah Owens")]
    pub name: String,
    /// ISO 4217 currency code of the account
    #[schema(example = "GBP")]
    pub currency: String,
}

/// Institution sponsoring the payment on behalf of the debtor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SponsorParty {
    #[schema(example = "56781234")]
    pub account_number: String,
    #[schema(example = "123123")]
    pub bank_id: String,
    #[schema(example = "GBDSC")]
    pub bank_id_code: String,
}
