//! Server-Sent Events handler for live snapshot streaming.
//!
//! Clients connect to `GET /api/events` and receive a named `update`
//! event carrying the serialized snapshot each time the scheduler
//! publishes one. A freshly connected client is immediately replayed
//! the current snapshot (when one exists) so the dashboard has data
//! before the next tick.
//!
//! Disconnection is the only cancellation primitive: when the client
//! goes away the stream is dropped, the guard unsubscribes the channel,
//! and subsequent publishes skip it.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::mpsc;
use tracing::debug;

use crate::broadcast::SubscriberId;
use crate::state::AppState;

/// Name of the SSE event carrying a snapshot payload.
const UPDATE_EVENT: &str = "update";

/// Unsubscribes the channel when the SSE stream is dropped.
struct SubscriberGuard {
    id: SubscriberId,
    state: Arc<AppState>,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        debug!(subscriber = %self.id, "SSE client disconnected");
        self.state.broadcaster.unsubscribe(self.id);
    }
}

/// Per-connection stream state: the subscriber channel, an optional
/// replay of the current snapshot, and the unsubscribe guard.
struct EventSource {
    rx: mpsc::Receiver<String>,
    replay: Option<String>,
    _guard: SubscriberGuard,
}

/// Open an SSE stream of snapshot `update` events.
///
/// # Route
///
/// `GET /api/events`
pub async fn sse_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, rx) = state.broadcaster.subscribe();
    debug!(subscriber = %id, "SSE client connected");

    // Replay the latest snapshot so the client is not left waiting for
    // the next scheduler tick. This read goes through the store, not
    // the broadcaster: subscribe() itself stays side-effect-free.
    let replay = match state.store.current().await {
        Some(snapshot) => serde_json::to_string(&*snapshot).ok(),
        None => None,
    };

    let source = EventSource {
        rx,
        replay,
        _guard: SubscriberGuard {
            id,
            state: Arc::clone(&state),
        },
    };

    let stream = futures::stream::unfold(source, |mut source| async move {
        if let Some(json) = source.replay.take() {
            return Some((
                Ok::<Event, Infallible>(Event::default().event(UPDATE_EVENT).data(json)),
                source,
            ));
        }
        source
            .rx
            .recv()
            .await
            .map(|json| (Ok(Event::default().event(UPDATE_EVENT).data(json)), source))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
