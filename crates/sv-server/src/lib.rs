//! sv-server: HTTP surface of stash-vr.
//!
//! Exposes per-player video data endpoints backed by a [`SceneCatalog`]
//! and the synthesis engine, plus a health probe. Shuts down gracefully on
//! Ctrl+C, SIGTERM or cancellation.
//!
//! [`SceneCatalog`]: sv_stash::SceneCatalog

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use sv_core::config::Config;
use sv_stash::StashClient;
use tokio_util::sync::CancellationToken;

pub use context::AppContext;
pub use router::build_router;

/// Start the stash-vr server against the configured Stash instance.
///
/// Returns when a shutdown signal is received.
pub async fn start(config: Config) -> sv_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }
    tracing::info!(config = ?config.redacted(), "Loaded configuration");

    let catalog = Arc::new(StashClient::new(&config.stash)?);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| sv_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let ctx = AppContext::new(config, catalog);
    serve(ctx, addr, CancellationToken::new()).await
}

/// Serve `ctx` on `addr` until a shutdown signal or `cancel` fires.
pub async fn serve(
    ctx: AppContext,
    addr: SocketAddr,
    cancel: CancellationToken,
) -> sv_core::Result<()> {
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| sv_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;
    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await
        .map_err(|e| sv_core::Error::Internal(format!("Server error: {e}")))?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
