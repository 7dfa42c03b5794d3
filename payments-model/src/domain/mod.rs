//! Domain models for the payment records service.

pub mod id;
pub mod party;
pub mod payment;
pub mod quote;

pub use id::PaymentId;
pub use party::{Party, SponsorParty};
pub use payment::{Attributes, DocumentType, Payment};
pub use quote::{Charge, ChargesInformation, ForeignExchange};
