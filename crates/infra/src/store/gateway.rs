//! User-record gateway over an [`ItemStore`].
//!
//! The gateway owns record translation (user ⇄ item), the configured table name,
//! and call supervision: each backend call is raced against the caller's
//! cancellation token and a per-call timeout, so a stuck backend turns into a
//! prompt `StoreError` instead of a hung request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use accounts_auth::CredentialQuery;
use accounts_core::{User, UserId};

use super::filter::ScanFilter;
use super::item::{AttributeValue, RecordError, item_to_user, user_to_item};
use super::r#trait::{ItemStore, StoreError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("stored record is unreadable: {0}")]
    Record(#[from] RecordError),
}

/// Shared, read-only handle to the user table.
///
/// Cheap to clone; every clone talks to the same backend.
#[derive(Clone)]
pub struct StoreGateway {
    store: Arc<dyn ItemStore>,
    table: Arc<str>,
    call_timeout: Duration,
}

impl core::fmt::Debug for StoreGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreGateway")
            .field("table", &self.table)
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

impl StoreGateway {
    pub fn new(
        store: Arc<dyn ItemStore>,
        table: impl Into<Arc<str>>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            call_timeout,
        }
    }

    async fn supervised<T>(
        &self,
        cancel: &CancellationToken,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StoreError::Cancelled),
            res = tokio::time::timeout(self.call_timeout, call) => {
                res.unwrap_or(Err(StoreError::Timeout(self.call_timeout)))
            }
        }
    }

    /// Upsert `user` keyed by its id (overwrites an existing record).
    #[instrument(skip_all, fields(table = %self.table, user_id = %user.user_id))]
    pub async fn put_user(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<(), GatewayError> {
        let item = user_to_item(user);
        self.supervised(cancel, self.store.put(&self.table, &user.user_id, item))
            .await?;
        Ok(())
    }

    /// Load a user by id; `Ok(None)` when the key is absent.
    #[instrument(skip_all, fields(table = %self.table, user_id = %id))]
    pub async fn get_user(
        &self,
        id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, GatewayError> {
        let item = self
            .supervised(cancel, self.store.get(&self.table, id.as_str()))
            .await?;
        Ok(item.as_ref().map(item_to_user).transpose()?)
    }

    /// Scan for users whose stored credentials equal `query`.
    ///
    /// Bounded to [`CredentialQuery::LIMIT`] results; the backend still pays for a
    /// full table scan.
    #[instrument(skip_all, fields(table = %self.table))]
    pub async fn find_by_credentials(
        &self,
        query: &CredentialQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, GatewayError> {
        let filter = query
            .attribute_equalities()
            .into_iter()
            .fold(ScanFilter::new(), |f, (attr, value)| {
                f.eq(attr, AttributeValue::s(value))
            });

        let items = self
            .supervised(
                cancel,
                self.store
                    .scan(&self.table, &filter, Some(CredentialQuery::LIMIT)),
            )
            .await?;

        Ok(items.iter().map(item_to_user).collect::<Result<Vec<_>, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryItemStore;
    use accounts_core::LoginCredential;
    use async_trait::async_trait;

    fn gateway(store: Arc<dyn ItemStore>) -> StoreGateway {
        StoreGateway::new(store, "users", Duration::from_secs(5))
    }

    struct HangingStore;

    #[async_trait]
    impl ItemStore for HangingStore {
        async fn put(&self, _: &str, _: &str, _: crate::store::Item) -> Result<(), StoreError> {
            std::future::pending().await
        }

        async fn get(&self, _: &str, _: &str) -> Result<Option<crate::store::Item>, StoreError> {
            std::future::pending().await
        }

        async fn scan(
            &self,
            _: &str,
            _: &ScanFilter,
            _: Option<usize>,
        ) -> Result<Vec<crate::store::Item>, StoreError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips_user() {
        let gw = gateway(Arc::new(InMemoryItemStore::new()));
        let cancel = CancellationToken::new();
        let user = User::new("u1", "Ann", "a@x.com", "p1");

        gw.put_user(&user, &cancel).await.unwrap();
        let id: UserId = "u1".parse().unwrap();
        assert_eq!(gw.get_user(&id, &cancel).await.unwrap(), Some(user));

        let unknown: UserId = "nobody".parse().unwrap();
        assert_eq!(gw.get_user(&unknown, &cancel).await.unwrap(), None);
    }

    #[tokio::test]
    async fn credentials_match_on_email_and_password() {
        let gw = gateway(Arc::new(InMemoryItemStore::new()));
        let cancel = CancellationToken::new();
        gw.put_user(&User::new("u1", "Ann", "a@x.com", "p1"), &cancel)
            .await
            .unwrap();

        let hit = CredentialQuery::from(LoginCredential::new("a@x.com", "p1"));
        let miss = CredentialQuery::from(LoginCredential::new("a@x.com", "p2"));

        assert_eq!(gw.find_by_credentials(&hit, &cancel).await.unwrap().len(), 1);
        assert!(gw.find_by_credentials(&miss, &cancel).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_item_surfaces_record_error() {
        let store = Arc::new(InMemoryItemStore::new());
        let mut item = user_to_item(&User::new("u1", "Ann", "a@x.com", "p1"));
        item.remove("name");
        store.put("users", "u1", item).await.unwrap();

        let gw = gateway(store);
        let id: UserId = "u1".parse().unwrap();
        let err = gw.get_user(&id, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Record(RecordError::MissingAttribute("name"))));
    }

    #[tokio::test]
    async fn cancelled_token_aborts_call() {
        let gw = gateway(Arc::new(HangingStore));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let id: UserId = "u1".parse().unwrap();
        let err = gw.get_user(&id, &cancel).await.unwrap_err();
        assert!(matches!(err, GatewayError::Store(StoreError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_backend_times_out() {
        let gw = StoreGateway::new(Arc::new(HangingStore), "users", Duration::from_millis(50));
        let err = gw
            .put_user(&User::new("u1", "Ann", "a@x.com", "p1"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Store(StoreError::Timeout(_))));
    }
}
