//! Fan-out of published snapshots to live subscriber channels.
//!
//! The [`Broadcaster`] keeps a registry of open subscriber channels
//! keyed by [`SubscriberId`]. Publishing serializes the snapshot once
//! and offers the payload to every channel in registration order.
//! A channel whose receiving side has gone away is pruned from the
//! registry during that same publish; a channel that is merely slow
//! has the message dropped (delivery is at-most-once per tick) but
//! stays registered. Neither case disturbs the other channels or
//! surfaces an error to the scheduler.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use skywatch_core::snapshot::AstroSnapshot;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Queued payloads per subscriber before publishes start dropping.
const SUBSCRIBER_QUEUE_CAPACITY: usize = 32;

/// Unique identifier for a subscriber channel.
///
/// UUID v7 (time-ordered), so registry iteration order matches
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of live subscriber channels with serialize-once fan-out.
#[derive(Debug, Default)]
pub struct Broadcaster {
    subscribers: Mutex<BTreeMap<SubscriberId, mpsc::Sender<String>>>,
}

impl Broadcaster {
    /// Create a broadcaster with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register a new subscriber channel.
    ///
    /// Returns the channel id and the receiving end. Registration alone
    /// has no other side effect -- in particular it does not deliver the
    /// current snapshot; a caller wanting immediate data reads the
    /// store itself.
    pub fn subscribe(&self) -> (SubscriberId, mpsc::Receiver<String>) {
        let id = SubscriberId::new();
        let (tx, rx) = mpsc::channel(SUBSCRIBER_QUEUE_CAPACITY);
        self.registry().insert(id, tx);
        debug!(subscriber = %id, "subscriber registered");
        (id, rx)
    }

    /// Remove a subscriber channel and release its sender.
    ///
    /// Idempotent: removing an unknown or already-removed id is a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.registry().remove(&id).is_some() {
            debug!(subscriber = %id, "subscriber removed");
        }
    }

    /// Number of currently registered subscriber channels.
    pub fn subscriber_count(&self) -> usize {
        self.registry().len()
    }

    /// Serialize the snapshot once and offer it to every subscriber.
    ///
    /// Returns the number of channels the payload was delivered to.
    /// Channels whose receiver has been dropped are pruned; channels
    /// with a full queue keep their registration but skip this tick.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] only if the snapshot itself
    /// cannot be serialized; subscriber failures never propagate.
    pub fn publish(&self, snapshot: &AstroSnapshot) -> Result<usize, serde_json::Error> {
        let payload = serde_json::to_string(snapshot)?;

        let mut registry = self.registry();
        let mut delivered = 0_usize;
        let mut dead = Vec::new();

        for (id, tx) in registry.iter() {
            match tx.try_send(payload.clone()) {
                Ok(()) => delivered = delivered.saturating_add(1),
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(subscriber = %id, "subscriber lagging, dropping this update");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    dead.push(*id);
                }
            }
        }

        for id in &dead {
            registry.remove(id);
            debug!(subscriber = %id, "subscriber pruned (channel closed)");
        }

        info!(
            delivered,
            active = registry.len(),
            removed = dead.len(),
            "snapshot broadcast complete"
        );
        Ok(delivered)
    }

    /// Lock the registry, recovering from a poisoned mutex.
    ///
    /// Registry operations cannot leave the map in an inconsistent
    /// state, so continuing past a poison is sound.
    fn registry(&self) -> MutexGuard<'_, BTreeMap<SubscriberId, mpsc::Sender<String>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
