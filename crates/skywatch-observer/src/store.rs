//! Process-wide holder of the latest snapshot.
//!
//! The store starts empty and is replaced wholesale by the scheduler on
//! each tick; it is never mutated in place. Readers receive an `Arc` to
//! the published value, so a reader can never observe a torn mix of old
//! and new fields: it either sees the snapshot from before a `replace`
//! or the complete one after it.

use std::sync::Arc;

use skywatch_core::snapshot::AstroSnapshot;
use tokio::sync::RwLock;

/// Holder of at most one [`AstroSnapshot`].
///
/// One writer (the scheduler), arbitrarily many concurrent readers.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<AstroSnapshot>>>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Unconditionally swap in a new snapshot.
    pub async fn replace(&self, snapshot: Arc<AstroSnapshot>) {
        *self.current.write().await = Some(snapshot);
    }

    /// The latest snapshot, or `None` before the first computation.
    pub async fn current(&self) -> Option<Arc<AstroSnapshot>> {
        self.current.read().await.clone()
    }

    /// Whether a snapshot has been published yet.
    pub async fn is_populated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use skywatch_core::build_snapshot;

    use super::*;

    fn snapshot_at(hour: u32) -> Arc<AstroSnapshot> {
        let t = Utc.with_ymd_and_hms(2026, 4, 1, hour, 0, 0).unwrap();
        Arc::new(build_snapshot(t, 51.476_9))
    }

    #[tokio::test]
    async fn starts_empty() {
        let store = SnapshotStore::new();
        assert!(store.current().await.is_none());
        assert!(!store.is_populated().await);
    }

    #[tokio::test]
    async fn replace_then_read_returns_the_value() {
        let store = SnapshotStore::new();
        let snap = snapshot_at(6);
        store.replace(Arc::clone(&snap)).await;

        let current = store.current().await.unwrap();
        assert_eq!(*current, *snap);
        assert!(store.is_populated().await);
    }

    #[tokio::test]
    async fn second_replace_wins() {
        let store = SnapshotStore::new();
        let first = snapshot_at(6);
        let second = snapshot_at(18);
        store.replace(first).await;
        store.replace(Arc::clone(&second)).await;

        let current = store.current().await.unwrap();
        assert_eq!(current.last_updated, second.last_updated);
    }

    #[tokio::test]
    async fn concurrent_readers_see_whole_values() {
        let store = Arc::new(SnapshotStore::new());
        let snap = snapshot_at(12);
        store.replace(Arc::clone(&snap)).await;

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let current = store.current().await.unwrap();
                // A fully-formed snapshot always carries its timestamp
                // and a complete ASCII art block.
                assert!(!current.last_updated.is_empty());
                assert_eq!(current.moon_ascii_art.as_ref().unwrap().len(), 6);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }
}
