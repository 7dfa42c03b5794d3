//! SQLite document store adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use payments_model::{Collection, Payment, PaymentId, PaymentStore, StoreError};

use crate::types::{DocumentRow, map_db_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store keeping each payment as a JSON text document.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the database and creates the `documents` table if needed.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut pool_options = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            // Every connection to :memory: is its own database.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        let ddl = include_str!("../migrations/0001_create_documents.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}

fn encode(payment: &Payment) -> Result<String, StoreError> {
    serde_json::to_string(payment).map_err(|e| StoreError::Corrupt(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentStore for SqliteStore {
    async fn insert(&self, collection: &Collection, payment: &Payment) -> Result<(), StoreError> {
        let body = encode(payment)?;

        sqlx::query(
            r#"INSERT INTO documents (db_name, collection, id, body) VALUES (?, ?, ?, ?)"#,
        )
        .bind(&collection.database)
        .bind(&collection.name)
        .bind(payment.id.to_hex())
        .bind(&body)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn find(&self, collection: &Collection, id: PaymentId) -> Result<Payment, StoreError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"SELECT id, body FROM documents WHERE db_name = ? AND collection = ? AND id = ?"#,
        )
        .bind(&collection.database)
        .bind(&collection.name)
        .bind(id.to_hex())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.ok_or(StoreError::NotFound)?.into_payment()
    }

    async fn find_all(&self, collection: &Collection) -> Result<Vec<Payment>, StoreError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"SELECT id, body FROM documents WHERE db_name = ? AND collection = ? ORDER BY seq"#,
        )
        .bind(&collection.database)
        .bind(&collection.name)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(DocumentRow::into_payment).collect()
    }

    async fn update(
        &self,
        collection: &Collection,
        id: PaymentId,
        payment: &Payment,
    ) -> Result<(), StoreError> {
        let body = encode(payment)?;

        let result = sqlx::query(
            r#"UPDATE documents SET body = ? WHERE db_name = ? AND collection = ? AND id = ?"#,
        )
        .bind(&body)
        .bind(&collection.database)
        .bind(&collection.name)
        .bind(id.to_hex())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, collection: &Collection, id: PaymentId) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"DELETE FROM documents WHERE db_name = ? AND collection = ? AND id = ?"#,
        )
        .bind(&collection.database)
        .bind(&collection.name)
        .bind(id.to_hex())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
