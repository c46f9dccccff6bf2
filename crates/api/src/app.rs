//! Process wiring: configuration in, listening service out.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use accounts_infra::{AppConfig, ItemStore, StoreGateway, store};

use crate::http;
use crate::router::Router;

/// Assemble the dispatcher over an already-connected store.
pub fn build_router(config: &AppConfig, store: Arc<dyn ItemStore>) -> Router {
    if config.api_key.is_none() {
        tracing::warn!("ACCOUNTS_API_KEY not set; user creation is unauthenticated");
    }

    let gateway = StoreGateway::new(store, config.table_name.clone(), config.store_timeout);
    Router::from_config(config, gateway)
}

/// Connect the store, bind, and serve until `shutdown` fires.
pub async fn serve(config: AppConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
    let store = store::connect(&config.store)
        .await
        .context("failed to connect store")?;
    let router = Arc::new(build_router(&config, store));
    let app = http::build_app(router, shutdown.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        prefix = %config.route_prefix,
        table = %config.table_name,
        mode = ?config.get_users_mode,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}
