//! Shared application state for the Observer API server.
//!
//! [`AppState`] bundles the two pieces of engine state the HTTP layer
//! serves from: the [`SnapshotStore`] holding the latest snapshot and
//! the [`Broadcaster`] fanning new snapshots out to live subscribers.
//! The scheduler is the only writer; every handler reads.

use std::sync::Arc;

use skywatch_core::snapshot::AstroSnapshot;
use tracing::warn;

use crate::broadcast::Broadcaster;
use crate::store::SnapshotStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Default)]
pub struct AppState {
    /// Holder of the latest published snapshot.
    pub store: SnapshotStore,
    /// Registry of live subscriber channels.
    pub broadcaster: Broadcaster,
}

impl AppState {
    /// Create application state with an empty store and no subscribers.
    pub fn new() -> Self {
        Self {
            store: SnapshotStore::new(),
            broadcaster: Broadcaster::new(),
        }
    }

    /// Publish a freshly built snapshot: swap it into the store, then
    /// fan it out to all current subscribers.
    ///
    /// Returns the number of subscriber channels the payload reached.
    /// A serialization failure is logged and skips the fan-out; the
    /// store still holds the new snapshot for on-demand reads.
    pub async fn publish_snapshot(&self, snapshot: AstroSnapshot) -> usize {
        let shared = Arc::new(snapshot);
        self.store.replace(Arc::clone(&shared)).await;
        match self.broadcaster.publish(&shared) {
            Ok(delivered) => delivered,
            Err(e) => {
                warn!(error = %e, "failed to serialize snapshot for broadcast");
                0
            }
        }
    }
}
