//! Observer server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_observer`] which launches the Observer HTTP + SSE
//! server on a background Tokio task. The engine binary calls this
//! during startup so the Observer API runs concurrently with the
//! scheduler loop.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{start_server, ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the Observer server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the Observer HTTP server on a background Tokio task.
///
/// Binds to `{host}:{port}` and serves the REST API plus the SSE
/// endpoint for live snapshot streaming. Returns a [`JoinHandle`] so
/// the caller can manage the server's lifecycle alongside the
/// scheduler loop.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address does not
/// parse. A bind failure surfaces asynchronously from the background
/// task and is logged there.
pub async fn spawn_observer(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task, so obvious misconfigurations fail startup loudly.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr_str}: {e}")))
    })?;

    let port = config.port;
    let handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config, state).await {
            tracing::error!(error = %e, "Observer server exited with error");
        }
    });

    tracing::info!(port, "Observer server spawned on background task");

    Ok(handle)
}
