use anyhow::Context;

use cadastro_api::config::Config;
use cadastro_infra::CompanyStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cadastro_observability::init();

    let config = Config::from_env();

    let store = CompanyStore::connect(&config.database_url).await?;
    let app = cadastro_api::app::build_app(&config, store.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("storage closed; shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler there is nothing to wait for; park
            // instead of shutting down a healthy server.
            tracing::error!("failed to install shutdown handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}
