//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_model::domain::{
    Attributes, Charge, ChargesInformation, DocumentType, ForeignExchange, Party, Payment,
    PaymentId, SponsorParty,
};
use payments_model::dto::{
    CreatePaymentRequest, CreatePaymentResponse, ErrorResponse, HealthResponse, Links,
    PaymentCollection,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
async fn health() {}

/// Creates new payment
#[utoipa::path(
    post,
    path = "/payment",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created", body = CreatePaymentResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 502, description = "Quote provider failed", body = ErrorResponse),
        (status = 503, description = "Quote provider unavailable", body = ErrorResponse)
    )
)]
async fn create_payment() {}

/// Get all payments
#[utoipa::path(
    get,
    path = "/payment",
    tag = "payments",
    responses(
        (status = 200, description = "All stored payments", body = PaymentCollection),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_payments() {}

/// Get a payment for given ID
#[utoipa::path(
    get,
    path = "/payment/{id}",
    tag = "payments",
    params(
        ("id" = String, Path, description = "Payment ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Single-element collection", body = PaymentCollection),
        (status = 404, description = "Not found", body = inline(serde_json::Value), example = json!({})),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_payment() {}

/// Update a payment for given ID - partial update is not supported
#[utoipa::path(
    put,
    path = "/payment/{id}",
    tag = "payments",
    params(
        ("id" = String, Path, description = "Payment ID (24 hex characters)")
    ),
    request_body = CreatePaymentRequest,
    responses(
        (status = 204, description = "Payment updated"),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_payment() {}

/// Delete a payment for given ID
#[utoipa::path(
    delete,
    path = "/payment/{id}",
    tag = "payments",
    params(
        ("id" = String, Path, description = "Payment ID (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 404, description = "Not found", body = inline(serde_json::Value), example = json!({})),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn delete_payment() {}

/// OpenAPI documentation for the payment records API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Records API",
        version = "1.0.0",
        description = "Create, query, replace and delete payment records. Amounts are converted at the quoted exchange rate when the debtor and beneficiary currencies differ.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_payment,
        list_payments,
        get_payment,
        update_payment,
        delete_payment,
    ),
    components(
        schemas(
            Payment,
            PaymentId,
            DocumentType,
            Attributes,
            Party,
            SponsorParty,
            ForeignExchange,
            Charge,
            ChargesInformation,
            CreatePaymentRequest,
            CreatePaymentResponse,
            PaymentCollection,
            Links,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment record operations"),
    )
)]
pub struct ApiDoc;
