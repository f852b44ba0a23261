//! HTTP server hosting the engine.
//!
//! The engine is built once and shared by `Arc` with every handler; HTTP
//! framing stays out here so the engine itself owns no sockets.

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::engine::Engine;
use crate::error::Result;
use crate::routes;

/// Bind and serve until interrupted.
pub async fn serve(addr: SocketAddr, engine: Arc<Engine>) -> Result<()> {
    let app = routes::router(engine);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "catalog-search listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
