//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod quotes;
mod store;

pub use quotes::{ChargesProvider, ExchangeRateProvider, QuoteError};
pub use store::{Collection, PaymentStore};
