//! Payment document model and assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::id::PaymentId;
use super::party::{Party, SponsorParty};
use super::quote::{ChargesInformation, ForeignExchange};
use crate::dto::CreatePaymentRequest;

/// Seconds from `0001-01-01T00:00:00Z` to the Unix epoch.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// Stored when a request carries no processing date.
fn zero_processing_date() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIME_SECS, 0).unwrap_or_default()
}

/// Resource type tag written on every stored document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DocumentType {
    #[default]
    Payment,
}

/// A persisted payment.
///
/// The id is assigned once at creation and carried over unchanged by
/// updates; every other field is recomputed from the latest request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub id: PaymentId,
    /// Always 0. Written for compatibility, never advanced or checked.
    pub version: u32,
    #[schema(example = "743d5b63-8e6f-432e-a8fa-c5d8d2ee5fcb")]
    pub organisation_id: String,
    pub attributes: Attributes,
}

/// Payment details: converted amount, parties, quotes and pass-through
/// references copied from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attributes {
    /// Requested amount divided by the exchange rate
    #[schema(example = 100.21)]
    pub amount: f64,
    pub beneficiary_party: Party,
    pub charges_information: ChargesInformation,
    /// Always the beneficiary's currency
    #[schema(example = "USD")]
    pub currency: String,
    pub debtor_party: Party,
    pub end_to_end_reference: String,
    pub fx: ForeignExchange,
    pub numeric_reference: String,
    pub payment_id: String,
    pub payment_purpose: String,
    pub payment_scheme: String,
    pub payment_type: String,
    pub processing_date: DateTime<Utc>,
    pub reference: String,
    pub scheme_payment_sub_type: String,
    pub scheme_payment_type: String,
    pub sponsor_party: SponsorParty,
}

impl Payment {
    /// Builds a payment document from a request and its computed quotes.
    ///
    /// Pure: the caller supplies the id (fresh on create, the existing one
    /// on update), the converted amount, and the quotes.
    pub fn assemble(
        id: PaymentId,
        amount: f64,
        fx: ForeignExchange,
        charges: ChargesInformation,
        req: &CreatePaymentRequest,
    ) -> Self {
        Self {
            kind: DocumentType::Payment,
            id,
            version: 0,
            organisation_id: req.organisation_id.clone(),
            attributes: Attributes {
                amount,
                beneficiary_party: req.beneficiary_party.clone(),
                charges_information: charges,
                currency: req.beneficiary_party.currency.clone(),
                debtor_party: req.debtor_party.clone(),
                end_to_end_reference: req.end_to_end_reference.clone(),
                fx,
                numeric_reference: req.numeric_reference.clone(),
                payment_id: req.payment_id.clone(),
                payment_purpose: req.payment_purpose.clone(),
                payment_scheme: req.payment_scheme.clone(),
                payment_type: req.payment_type.clone(),
                processing_date: req.processing_date.unwrap_or_else(zero_processing_date),
                reference: req.reference.clone(),
                scheme_payment_sub_type: req.scheme_payment_sub_type.clone(),
                scheme_payment_type: req.scheme_payment_type.clone(),
                sponsor_party: req.sponsor_party.clone(),
            },
        }
    }
}
