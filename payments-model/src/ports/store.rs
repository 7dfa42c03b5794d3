//! Document store port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (SQLite, Postgres, in-memory) implement this trait.

use std::fmt;
use std::sync::Arc;

use crate::domain::{Payment, PaymentId};
use crate::error::StoreError;

/// A named collection inside a named database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection {
    pub database: String,
    pub name: String,
}

impl Collection {
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.name)
    }
}

/// Persistence gateway for payment documents.
///
/// Every call is scoped to one collection. There is no transaction across
/// calls and no version check on update: the last write wins.
#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync + 'static {
    /// Stores a new document. Fails with `Conflict` if the id is taken.
    async fn insert(&self, collection: &Collection, payment: &Payment) -> Result<(), StoreError>;

    /// Fetches a document by id, or `NotFound`.
    async fn find(&self, collection: &Collection, id: PaymentId) -> Result<Payment, StoreError>;

    /// Fetches every document in insertion order.
    async fn find_all(&self, collection: &Collection) -> Result<Vec<Payment>, StoreError>;

    /// Replaces a document, or `NotFound`.
    async fn update(
        &self,
        collection: &Collection,
        id: PaymentId,
        payment: &Payment,
    ) -> Result<(), StoreError>;

    /// Removes a document, or `NotFound`.
    async fn delete(&self, collection: &Collection, id: PaymentId) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S: PaymentStore + ?Sized> PaymentStore for Arc<S> {
    async fn insert(&self, collection: &Collection, payment: &Payment) -> Result<(), StoreError> {
        (**self).insert(collection, payment).await
    }

    async fn find(&self, collection: &Collection, id: PaymentId) -> Result<Payment, StoreError> {
        (**self).find(collection, id).await
    }

    async fn find_all(&self, collection: &Collection) -> Result<Vec<Payment>, StoreError> {
        (**self).find_all(collection).await
    }

    async fn update(
        &self,
        collection: &Collection,
        id: PaymentId,
        payment: &Payment,
    ) -> Result<(), StoreError> {
        (**self).update(collection, id, payment).await
    }

    async fn delete(&self, collection: &Collection, id: PaymentId) -> Result<(), StoreError> {
        (**self).delete(collection, id).await
    }
}
