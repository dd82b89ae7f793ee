//! HTTP server initialization and runtime setup.
//!
//! Opens the store handle, builds the router, and runs Axum until a
//! shutdown signal arrives.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::store::{MemoryMappingStore, RedisMappingStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the configured mapping store.
///
/// # Errors
///
/// Returns an error if the Redis store cannot be reached.
pub async fn open_store(config: &Config) -> Result<Arc<dyn MappingRepository>> {
    let store: Arc<dyn MappingRepository> = match config.store_backend {
        StoreBackend::Redis => {
            let store = RedisMappingStore::connect(&config.redis_url, config.store_options())
                .await
                .context("Failed to open Redis store")?;
            tracing::info!("Store opened (Redis)");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Store opened (in-memory); mappings are lost on restart");
            Arc::new(MemoryMappingStore::new())
        }
    };

    Ok(store)
}

/// Runs the HTTP server with the given configuration.
///
/// The store handle is opened once here, shared by every request, and
/// released after the server has drained on shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config).await?;

    let state = AppState::new(store, config.base_url.clone());
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, store handle released");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
