//! # Payments API
//!
//! Application service layer and HTTP adapter for the payment records
//! service.
//!
//! ## Architecture
//!
//! - `service` - Application service (quotes, assembly, persistence)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `S: PaymentStore`, allowing different store
//! adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::PaymentService;
