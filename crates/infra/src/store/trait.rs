use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::filter::ScanFilter;
use super::item::Item;

/// Store operation error.
///
/// These are **infrastructure errors** (backend unavailable, call aborted) as
/// opposed to domain errors (validation, not found). Every variant is treated as
/// transient by callers; nothing here is retried internally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend call failed: {0}")]
    Backend(String),

    #[error("store call cancelled")]
    Cancelled,

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("lock poisoned")]
    LockPoisoned,
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// Remote key-value backend, addressed by table name.
///
/// ## Semantics
///
/// - `put`: idempotent upsert keyed by `key`. There is no uniqueness check; a
///   second put with the same key silently replaces the first (last writer wins).
/// - `get`: exact key lookup; `Ok(None)` means the key is absent.
/// - `scan`: inspects every item of the table and returns those matching
///   `filter`, stopping after `limit` matches when a limit is given. The full
///   scan cost is paid regardless of the limit.
///
/// All three calls are unary request/response; implementations must be safe to
/// share across concurrent requests without external locking.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn put(&self, table: &str, key: &str, item: Item) -> Result<(), StoreError>;

    async fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError>;

    async fn scan(
        &self,
        table: &str,
        filter: &ScanFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Item>, StoreError>;
}

#[async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn put(&self, table: &str, key: &str, item: Item) -> Result<(), StoreError> {
        (**self).put(table, key, item).await
    }

    async fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError> {
        (**self).get(table, key).await
    }

    async fn scan(
        &self,
        table: &str,
        filter: &ScanFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Item>, StoreError> {
        (**self).scan(table, filter, limit).await
    }
}
