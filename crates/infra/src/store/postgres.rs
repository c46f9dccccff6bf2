//! Postgres-backed key-value store.
//!
//! All logical tables share one physical table, `kv_items`, keyed by
//! `(table_name, pk)`. Items are stored as JSONB in their tagged attribute form,
//! so a scan filter (a conjunction of equalities) maps directly to JSONB
//! containment (`attributes @> $filter`).
//!
//! ## Error Mapping
//!
//! Every SQLx error (pool closed, network failure, constraint violation) becomes
//! `StoreError::Backend`. Callers treat it as transient; nothing is retried here.
//!
//! ## Thread Safety
//!
//! `PostgresItemStore` is `Send + Sync`; the SQLx pool handles connection sharing.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;

use super::filter::ScanFilter;
use super::item::Item;
use super::r#trait::{ItemStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kv_items (
    table_name TEXT NOT NULL,
    pk TEXT NOT NULL,
    attributes JSONB NOT NULL,
    PRIMARY KEY (table_name, pk)
)
"#;

/// Postgres-backed item store.
#[derive(Debug, Clone)]
pub struct PostgresItemStore {
    pool: Arc<PgPool>,
}

impl PostgresItemStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a small connection pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the backing table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&*self.pool).await?;
        Ok(())
    }
}

fn decode_row(row: &sqlx::postgres::PgRow) -> Result<Item, StoreError> {
    let Json(item) = row.try_get::<Json<Item>, _>("attributes")?;
    Ok(item)
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    #[instrument(skip(self, item), fields(operation = "put_item"))]
    async fn put(&self, table: &str, key: &str, item: Item) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_items (table_name, pk, attributes)
            VALUES ($1, $2, $3)
            ON CONFLICT (table_name, pk)
            DO UPDATE SET attributes = EXCLUDED.attributes
            "#,
        )
        .bind(table)
        .bind(key)
        .bind(Json(&item))
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(operation = "get_item"))]
    async fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT attributes
            FROM kv_items
            WHERE table_name = $1 AND pk = $2
            "#,
        )
        .bind(table)
        .bind(key)
        .fetch_optional(&*self.pool)
        .await?;

        row.as_ref().map(decode_row).transpose()
    }

    #[instrument(skip(self, filter), fields(operation = "scan", filter = %filter.expression()))]
    async fn scan(
        &self,
        table: &str,
        filter: &ScanFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Item>, StoreError> {
        // LIMIT NULL means no limit in Postgres.
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let rows = sqlx::query(
            r#"
            SELECT attributes
            FROM kv_items
            WHERE table_name = $1 AND attributes @> $2
            ORDER BY pk
            LIMIT $3
            "#,
        )
        .bind(table)
        .bind(Json(filter.as_partial_item()))
        .bind(limit)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(decode_row).collect()
    }
}
