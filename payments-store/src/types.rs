//! Row type shared by the SQL adapters.

use sqlx::FromRow;

use payments_model::{Payment, StoreError};

/// A stored document. `body` is the payment as JSON text.
#[derive(FromRow)]
pub struct DocumentRow {
    pub id: String,
    pub body: String,
}

impl DocumentRow {
    pub fn into_payment(self) -> Result<Payment, StoreError> {
        serde_json::from_str(&self.body)
            .map_err(|e| StoreError::Corrupt(format!("document {}: {}", self.id, e)))
    }
}

/// Maps a driver error, keeping unique-key violations apart.
pub fn map_db_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.message().to_string())
        }
        _ => StoreError::Database(err.to_string()),
    }
}
