//! REST API endpoint handlers for the Observer server.
//!
//! All handlers read from the [`SnapshotStore`] via the shared
//! [`AppState`]; nothing here ever writes engine state.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/data` | Latest snapshot (503 before first tick) |
//! | `GET` | `/api/events` | SSE stream of snapshot updates (see [`sse`]) |
//!
//! [`SnapshotStore`]: crate::store::SnapshotStore
//! [`sse`]: crate::sse

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing engine status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.current().await;
    let subscribers = state.broadcaster.subscriber_count();

    let (status, phase, illumination, updated) = snapshot.as_ref().map_or_else(
        || {
            (
                "WAITING FOR FIRST SNAPSHOT",
                String::from("-"),
                String::from("-"),
                String::from("-"),
            )
        },
        |snap| {
            (
                "RUNNING",
                snap.moon_phase_name
                    .map_or_else(|| String::from("-"), |p| p.to_string()),
                snap.moon_illumination_percent
                    .map_or_else(|| String::from("-"), |pct| format!("{pct:.1}%")),
                snap.last_updated.clone(),
            )
        },
    );

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Skywatch Observer</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Skywatch Observer</h1>
    <p class="subtitle">Live astronomical snapshot server</p>

    <p>Status: <span class="status">{status}</span></p>

    <div>
        <div class="metric">
            <div class="label">Moon phase</div>
            <div class="value">{phase}</div>
        </div>
        <div class="metric">
            <div class="label">Illumination</div>
            <div class="value">{illumination}</div>
        </div>
        <div class="metric">
            <div class="label">Subscribers</div>
            <div class="value">{subscribers}</div>
        </div>
        <div class="metric">
            <div class="label">Last updated</div>
            <div class="value">{updated}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/data">/api/data</a> -- Latest snapshot (JSON)</li>
        <li><a href="/api/events">/api/events</a> -- Live snapshot stream (SSE, named <code>update</code> events)</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/data -- latest snapshot on demand
// ---------------------------------------------------------------------------

/// Return the latest snapshot as JSON.
///
/// Responds `503 Service Unavailable` until the scheduler has completed
/// its first tick -- never an empty or default payload.
pub async fn get_data(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state
        .store
        .current()
        .await
        .ok_or(ObserverError::SnapshotUnavailable)?;
    Ok(Json(serde_json::to_value(&*snapshot)?))
}
