//! PostgreSQL document store adapter.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use payments_model::{Collection, Payment, PaymentId, PaymentStore, StoreError};

use crate::types::{DocumentRow, map_db_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Store
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL store keeping each payment in a JSONB column.
pub struct PostgresStore {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_documents_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresStore {
    /// Connects and creates the `documents` table if needed.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentStore for PostgresStore {
    async fn insert(&self, collection: &Collection, payment: &Payment) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO documents (db_name, collection, id, body) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(&collection.database)
        .bind(&collection.name)
        .bind(payment.id.to_hex())
        .bind(Json(payment))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn find(&self, collection: &Collection, id: PaymentId) -> Result<Payment, StoreError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"SELECT id, body::text AS body FROM documents
               WHERE db_name = $1 AND collection = $2 AND id = $3"#,
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
            r#"SELECT id, body::text AS body FROM documents
               WHERE db_name = $1 AND collection = $2 ORDER BY seq"#,
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
        let result = sqlx::query(
            r#"UPDATE documents SET body = $1 WHERE db_name = $2 AND collection = $3 AND id = $4"#,
        )
        .bind(Json(payment))
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
            r#"DELETE FROM documents WHERE db_name = $1 AND collection = $2 AND id = $3"#,
        )
        .bind(&collection.database)
        .bind(&collection.name)
        .bind(id.to_hex())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            tracing::debug!(%collection, %id, "Delete matched no document");
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    /// Connects to `TEST_POSTGRES_URL`, or skips when it is unset.
    async fn setup_store() -> Option<PostgresStore> {
        let url = std::env::var("TEST_POSTGRES_URL").ok()?;
        let store = PostgresStore::new(&url).await.unwrap();
        sqlx::query("DELETE FROM documents")
            .execute(store.pool())
            .await
            .unwrap();
        Some(store)
    }

    #[tokio::test]
    async fn test_postgres_store_behaviour() {
        let Some(store) = setup_store().await else {
            return;
        };

        test_support::find_all_in_insertion_order(&store).await;
        test_support::insert_then_find(&store).await;
        test_support::find_missing(&store).await;
        test_support::update_replaces(&store).await;
        test_support::update_missing(&store).await;
        test_support::delete_then_find(&store).await;
        test_support::delete_missing(&store).await;
        test_support::duplicate_id_conflicts(&store).await;
        test_support::collections_are_isolated(&store).await;
        test_support::converted_amounts_round_trip_exactly(&store).await;
    }
}
