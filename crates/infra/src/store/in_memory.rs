use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use super::filter::ScanFilter;
use super::item::Item;
use super::r#trait::{ItemStore, StoreError};

/// In-memory key-value store.
///
/// Intended for tests/dev. Scans walk every item of the table in key order.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    tables: RwLock<HashMap<String, BTreeMap<String, Item>>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently held in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .read()
            .map(|t| t.get(table).map_or(0, |items| items.len()))
            .unwrap_or(0)
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn put(&self, table: &str, key: &str, item: Item) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), item);
        Ok(())
    }

    async fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.get(table).and_then(|items| items.get(key)).cloned())
    }

    async fn scan(
        &self,
        table: &str,
        filter: &ScanFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let Some(items) = tables.get(table) else {
            return Ok(vec![]);
        };

        Ok(items
            .values()
            .filter(|item| filter.matches(item))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::item::AttributeValue;

    fn item(id: &str, email: &str) -> Item {
        Item::from([
            ("userId".to_string(), AttributeValue::s(id)),
            ("email".to_string(), AttributeValue::s(email)),
        ])
    }

    #[tokio::test]
    async fn put_overwrites_same_key() {
        let store = InMemoryItemStore::new();
        store.put("users", "u1", item("u1", "old@x.com")).await.unwrap();
        store.put("users", "u1", item("u1", "new@x.com")).await.unwrap();

        assert_eq!(store.len("users"), 1);
        let got = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(got["email"], AttributeValue::s("new@x.com"));
    }

    #[tokio::test]
    async fn tables_are_isolated() {
        let store = InMemoryItemStore::new();
        store.put("users", "u1", item("u1", "a@x.com")).await.unwrap();

        assert!(store.get("other", "u1").await.unwrap().is_none());
        assert!(store.get("users", "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scan_respects_filter_and_limit() {
        let store = InMemoryItemStore::new();
        store.put("users", "u1", item("u1", "same@x.com")).await.unwrap();
        store.put("users", "u2", item("u2", "same@x.com")).await.unwrap();
        store.put("users", "u3", item("u3", "other@x.com")).await.unwrap();

        let f = ScanFilter::new().eq("email", AttributeValue::s("same@x.com"));
        assert_eq!(store.scan("users", &f, None).await.unwrap().len(), 2);

        let capped = store.scan("users", &f, Some(1)).await.unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0]["userId"], AttributeValue::s("u1"));

        assert!(store.scan("missing", &f, None).await.unwrap().is_empty());
    }
}
