//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + SSE) into a single [`Router`] with CORS
//! middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::sse;
use crate::state::AppState;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/data` -- latest snapshot (JSON, 503 before first tick)
/// - `GET /api/events` -- SSE snapshot update stream
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/data", get(handlers::get_data))
        // Live updates
        .route("/api/events", get(sse::sse_events))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
