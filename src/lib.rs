//! rankqueue -- a dynamically re-ranked work-order queue served over HTTP.
//!
//! Orders are ranked by requester tier and elapsed wait time; the queue is
//! re-sorted on every mutation and read operations see the order as of the
//! instant they run.

pub mod api;
pub mod config;
pub mod queue;

use anyhow::{Context, Result};

use crate::config::ServiceConfig;

/// Start the rankqueue daemon: one shared queue behind the HTTP API.
pub async fn serve(config: &ServiceConfig) -> Result<()> {
    let queue = queue::SharedQueue::new();
    let app = api::router(api::state::AppState::new(queue));

    let addr: std::net::SocketAddr = config
        .server
        .listen_address
        .parse()
        .with_context(|| format!("invalid listen address: {}", config.server.listen_address))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "rankqueue listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("rankqueue stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
