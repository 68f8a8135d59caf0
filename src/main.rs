//! Book Catalog - A CRUD service with a cached book list
//!
//! Serves the V1/V2 book API over HTTP, backed by Postgres when
//! `DATABASE_URL` is set and by a seeded in-memory store otherwise.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_catalog::api::create_router;
use book_catalog::store::PostgresBookStore;
use book_catalog::{spawn_cache_cleanup_task, AppState, Config};

/// Maximum Postgres pool size
const DB_MAX_CONNECTIONS: u32 = 10;

/// Main entry point for the book catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the entity store (Postgres or in-memory)
/// 4. Start background cache cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Book Catalog Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_sliding_ttl={}s, cache_absolute_ttl={}s, cleanup_interval={}s",
        config.server_port,
        config.cache_sliding_ttl,
        config.cache_absolute_ttl,
        config.cleanup_interval
    );

    let state = match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresBookStore::connect(url, DB_MAX_CONNECTIONS)
                .await
                .context("failed to connect to Postgres and apply migrations")?;
            info!("Postgres book store ready");
            AppState::with_store(Arc::new(store), &config)
        }
        None => {
            warn!("DATABASE_URL not set, using seeded in-memory store");
            AppState::in_memory(&config)
        }
    };
    info!("Book service instance {}", state.books.instance_tag());

    let cleanup_handle = spawn_cache_cleanup_task(state.books.clone(), config.cleanup_interval);
    info!("Background cache cleanup task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cache cleanup task aborted");
}
