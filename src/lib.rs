// ============================================================================
// Movies Server
// ============================================================================
//
// REST API for movie records. Every request passes a bearer-token gate; the
// four CRUD operations map onto single conditional writes against a
// key-value store (Redis in production, in-memory for tests).
//
// ============================================================================

use anyhow::{Context, Result};
use axum::Router;
use movies_config::{Config, StoreBackend, StoreConfig};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;

pub mod auth;
pub mod context;
pub mod gateway;
pub mod models;
pub mod routes;
pub mod store;

use auth::{JwksVerifier, TokenVerifier};
use context::AppContext;
use store::{InMemoryStore, MovieStore, RedisStore};

/// Build the application router over the given store and verifier
pub fn app(store: Arc<dyn MovieStore>, verifier: Arc<dyn TokenVerifier>) -> Router {
    routes::create_router(Arc::new(AppContext::new(store, verifier)))
}

/// Open the configured store
pub async fn build_store(config: &StoreConfig) -> Result<Arc<dyn MovieStore>> {
    match config.backend {
        StoreBackend::Redis => {
            tracing::info!(redis_url = %config.redis_url_safe(), "Connecting to Redis...");
            let store = RedisStore::connect(&config.redis_url, config.key_prefix.clone())
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!(key_prefix = %config.key_prefix, "Connected to Redis");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Run the server until a shutdown signal arrives
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config.store).await?;
    let verifier = Arc::new(
        JwksVerifier::new(&config.auth).context("Failed to initialize token verifier")?,
    );
    tracing::info!(issuer = %config.auth.issuer, "Bearer tokens verified against issuer");

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Movies server listening on {}", config.bind_address);

    serve(
        listener,
        app(store, verifier),
        Duration::from_secs(config.shutdown_grace_secs),
    )
    .await
}

/// Serve until shutdown, then give in-flight requests `grace` to finish
pub async fn serve(listener: TcpListener, app: Router, grace: Duration) -> Result<()> {
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let grace_elapsed = async move {
        match signalled_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => {
            result.context("Server error")?;
            tracing::info!("Server stopped");
        }
        _ = grace_elapsed => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Grace period elapsed, abandoning in-flight requests"
            );
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received. Shutting down...");
}
