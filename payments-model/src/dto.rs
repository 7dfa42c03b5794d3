//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Party, Payment, PaymentId, SponsorParty};
use crate::error::DomainError;

/// Self link returned with every payment collection.
pub const PAYMENTS_SELF_LINK: &str = "https://api.test.form3.tech/v1/payments";

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment, also used to fully replace one.
///
/// `organisation_id`, both parties, `amount` and `bearer_code` are required;
/// every other field defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    #[schema(example = "743d5b63-8e6f-432e-a8fa-c5d8d2ee5fcb")]
    pub organisation_id: String,
    pub beneficiary_party: Party,
    pub debtor_party: Party,
    /// Amount in the debtor's terms, before conversion
    #[schema(example = 200.42)]
    pub amount: f64,
    #[schema(example = "SHAR")]
    pub bearer_code: String,
    #[serde(default)]
    pub payment_purpose: String,
    #[serde(default)]
    pub payment_scheme: String,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub end_to_end_reference: String,
    #[serde(default)]
    pub scheme_payment_sub_type: String,
    #[serde(default)]
    pub scheme_payment_type: String,
    #[serde(default)]
    pub sponsor_party: SponsorParty,
    #[serde(default)]
    pub numeric_reference: String,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_date: Option<DateTime<Utc>>,
}

impl CreatePaymentRequest {
    /// Checks the fields JSON decoding alone cannot enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.organisation_id.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "organisation_id is required".into(),
            ));
        }
        if self.bearer_code.trim().is_empty() {
            return Err(DomainError::ValidationError("bearer_code is required".into()));
        }
        if !self.amount.is_finite() || self.amount == 0.0 {
            return Err(DomainError::ValidationError(
                "amount must be a non-zero number".into(),
            ));
        }
        Ok(())
    }

    /// A rate lookup is needed when the parties hold different currencies.
    pub fn requires_foreign_exchange(&self) -> bool {
        self.debtor_party.currency != self.beneficiary_party.currency
    }
}

/// Response after creating a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentResponse {
    pub id: PaymentId,
    #[schema(example = "743d5b63-8e6f-432e-a8fa-c5d8d2ee5fcb")]
    pub organisation_id: String,
}

impl From<&Payment> for CreatePaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id,
            organisation_id: payment.organisation_id.clone(),
        }
    }
}

/// Links block of a collection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Links {
    #[serde(rename = "self")]
    #[schema(example = "https://api.test.form3.tech/v1/payments")]
    pub self_link: String,
}

/// Wrapper for one or more payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentCollection {
    pub data: Vec<Payment>,
    pub links: Links,
}

impl PaymentCollection {
    pub fn new(data: Vec<Payment>) -> Self {
        Self {
            data,
            links: Links {
                self_link: PAYMENTS_SELF_LINK.to_string(),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Service DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Health endpoint body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "Up and running!")]
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            message: "Up and running!".to_string(),
        }
    }
}

/// Error envelope returned on failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Failed to parse payment request")]
    pub message: String,
    #[schema(example = 400)]
    pub code: u16,
}
