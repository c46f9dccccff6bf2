use tokio_util::sync::CancellationToken;

use accounts_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    accounts_observability::init();

    let config = AppConfig::from_env()?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        tracing::info!("shutdown requested");
        signal.cancel();
    });

    accounts_api::app::serve(config, shutdown).await
}
