mod api;
mod config;
mod error;
mod history;
mod models;
mod observability;
mod state;
mod store;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::store::memory::InMemoryStore;
use crate::store::remote::RemoteDocumentStore;
use crate::store::OrderStore;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let store: Arc<dyn OrderStore> = match &config.store_url {
        Some(url) => {
            tracing::info!(store_url = %url, collection = %config.store_collection, "using remote document store");
            Arc::new(RemoteDocumentStore::new(
                url.clone(),
                config.store_collection.clone(),
                Duration::from_secs(config.store_timeout_secs),
            )?)
        }
        None => {
            tracing::warn!("STORE_URL not set; falling back to in-memory order store");
            Arc::new(InMemoryStore::new())
        }
    };

    let shared_state = Arc::new(state::AppState::new(store));
    let app = api::rest::router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| error::AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| error::AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
