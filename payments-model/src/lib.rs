//! # Payments Model
//!
//! Domain types and port traits for the payment records service.
//! This crate has no IO dependencies - only data structures, the payment
//! assembly rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Payment documents and the value objects embedded in them
//! - `ports/` - Trait definitions that store and quote adapters implement
//! - `dto/` - Request and response bodies at the HTTP boundary
//! - `error/` - Domain, store and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Attributes, Charge, ChargesInformation, DocumentType, ForeignExchange, Party, Payment,
    PaymentId, SponsorParty,
};
pub use dto::*;
pub use error::{AppError, DomainError, StoreError};
pub use ports::{ChargesProvider, Collection, ExchangeRateProvider, PaymentStore, QuoteError};
