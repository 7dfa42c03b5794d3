//! In-memory document store.

use async_trait::async_trait;
use dashmap::DashMap;

use payments_model::{Collection, Payment, PaymentId, PaymentStore, StoreError};

/// Document store held in process memory.
///
/// Each collection is an insertion-ordered list of documents. Contents are
/// lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<Collection, Vec<Payment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &Collection) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &Collection) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn insert(&self, collection: &Collection, payment: &Payment) -> Result<(), StoreError> {
        let mut docs = self.collections.entry(collection.clone()).or_default();
        if docs.iter().any(|doc| doc.id == payment.id) {
            return Err(StoreError::Conflict(format!(
                "duplicate id {} in {}",
                payment.id, collection
            )));
        }
        docs.push(payment.clone());
        Ok(())
    }

    async fn find(&self, collection: &Collection, id: PaymentId) -> Result<Payment, StoreError> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned())
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self, collection: &Collection) -> Result<Vec<Payment>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.value().clone())
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: &Collection,
        id: PaymentId,
        payment: &Payment,
    ) -> Result<(), StoreError> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound)?;
        let doc = docs
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(StoreError::NotFound)?;
        *doc = payment.clone();
        Ok(())
    }

    async fn delete(&self, collection: &Collection, id: PaymentId) -> Result<(), StoreError> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound)?;
        let index = docs
            .iter()
            .position(|doc| doc.id == id)
            .ok_or(StoreError::NotFound)?;
        docs.remove(index);
        Ok(())
    }
}
