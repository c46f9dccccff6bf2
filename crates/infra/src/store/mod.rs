//! Key-value store boundary.
//!
//! This module defines an infrastructure-facing abstraction over a remote
//! key-value backend (put / get-by-key / scan-with-filter) without making any
//! storage assumptions, plus the user-record gateway built on top of it.

pub mod filter;
pub mod gateway;
pub mod in_memory;
pub mod item;
pub mod postgres;
pub mod r#trait;

use std::sync::Arc;

pub use filter::ScanFilter;
pub use gateway::{GatewayError, StoreGateway};
pub use in_memory::InMemoryItemStore;
pub use item::{
    AttributeValue, Item, RecordError, USER_KEY_ATTRIBUTE, item_to_user, user_to_item,
};
pub use postgres::PostgresItemStore;
pub use r#trait::{ItemStore, StoreError};

use crate::config::StoreBackend;

/// Build the configured backend.
///
/// Called once at startup; the returned handle is shared by every request.
pub async fn connect(backend: &StoreBackend) -> Result<Arc<dyn ItemStore>, StoreError> {
    match backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; records are lost on restart");
            Ok(Arc::new(InMemoryItemStore::new()))
        }
        StoreBackend::Postgres { url } => {
            let store = PostgresItemStore::connect(url).await?;
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}
