//! Subscription manager for fanning out catalog snapshots.

use crate::types::{Keyboard, Revision};
use crossbeam_channel::{unbounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::types::{KeyboardSnapshot, SubscriptionConfig, SubscriptionHandle, SubscriptionId};

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<KeyboardSnapshot>,
}

impl Subscription {
    /// Send this subscription's view of `keyboards`. Returns false once the
    /// receiving side is gone.
    fn send_view(&self, keyboards: &[Keyboard], revision: Revision) -> bool {
        let snapshot = KeyboardSnapshot {
            revision,
            keyboards: self.config.filter.apply(keyboards),
        };
        self.sender.send(snapshot).is_ok()
    }
}

/// Manages subscriptions and broadcasts snapshots.
///
/// Callers must serialize `subscribe` and `broadcast` against each other
/// (the store does this with its write lock) for per-subscription ordering
/// to hold.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a subscription and queue its first snapshot, built from
    /// `current` at `revision`.
    pub fn subscribe(
        self: &Arc<Self>,
        config: SubscriptionConfig,
        current: &[Keyboard],
        revision: Revision,
    ) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = unbounded();

        let subscription = Subscription { config, sender };
        // The receiver is alive, so the seed send cannot fail.
        subscription.send_view(current, revision);

        debug!(
            subscription = id.0,
            filter = ?subscription.config.filter,
            "subscription registered"
        );
        self.subscriptions.write().insert(id, subscription);

        SubscriptionHandle {
            id,
            receiver,
            manager: Some(Arc::downgrade(self)),
        }
    }

    /// Unsubscribe and clean up. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.write().remove(&id).is_some();
        if removed {
            debug!(subscription = id.0, "subscription cancelled");
        }
        removed
    }

    /// Whether `id` is currently registered.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscriptions.read().contains_key(&id)
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Send every subscription its filtered view of `keyboards`.
    ///
    /// Subscriptions whose receiver has been dropped are removed.
    pub fn broadcast(&self, keyboards: &[Keyboard], revision: Revision) {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if !sub.send_view(keyboards, revision) {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in &to_remove {
                subs.remove(id);
            }
            debug!(pruned = to_remove.len(), "removed disconnected subscriptions");
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
