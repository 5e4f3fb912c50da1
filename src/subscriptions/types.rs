//! Subscription types for live catalog views.

use super::manager::SubscriptionManager;
use crate::types::{Keyboard, ManufacturerId, Revision};
use serde::{Deserialize, Serialize};
use std::sync::Weak;
use std::time::Duration;

/// Configuration for a subscription.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionConfig {
    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl SubscriptionConfig {
    /// Keyboards of a single manufacturer.
    pub fn manufacturer(id: ManufacturerId) -> Self {
        Self {
            filter: SubscriptionFilter::Manufacturer(id),
        }
    }
}

/// Which keyboards a subscription sees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubscriptionFilter {
    /// Every keyboard in the store.
    #[default]
    All,
    /// Keyboards whose manufacturer id matches.
    Manufacturer(ManufacturerId),
}

impl SubscriptionFilter {
    pub fn matches(&self, keyboard: &Keyboard) -> bool {
        match self {
            SubscriptionFilter::All => true,
            SubscriptionFilter::Manufacturer(id) => keyboard.manufacturer_id() == *id,
        }
    }

    /// Filtered copy of `keyboards`, preserving order.
    pub fn apply(&self, keyboards: &[Keyboard]) -> Vec<Keyboard> {
        keyboards
            .iter()
            .filter(|k| self.matches(k))
            .cloned()
            .collect()
    }
}

/// One emission of a subscription: the filtered collection as of `revision`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardSnapshot {
    pub revision: Revision,
    pub keyboards: Vec<Keyboard>,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to a live subscription.
///
/// Dropping the handle (or calling [`cancel`](Self::cancel)) unregisters it
/// from the store; anything still queued is discarded with the receiver.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive snapshots.
    pub receiver: crossbeam_channel::Receiver<KeyboardSnapshot>,
    pub(crate) manager: Option<Weak<SubscriptionManager>>,
}

impl SubscriptionHandle {
    /// Receive the next snapshot (blocking).
    pub fn recv(&self) -> Result<KeyboardSnapshot, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a snapshot (non-blocking).
    pub fn try_recv(&self) -> Result<KeyboardSnapshot, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<KeyboardSnapshot, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything queued and return only the newest snapshot.
    pub fn latest(&self) -> Option<KeyboardSnapshot> {
        self.receiver.try_iter().last()
    }

    /// Blocking iterator over snapshots. Ends only when the store goes away.
    pub fn iter(&self) -> crossbeam_channel::Iter<'_, KeyboardSnapshot> {
        self.receiver.iter()
    }

    /// Whether the store still holds this registration.
    pub fn is_active(&self) -> bool {
        self.manager
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|m| m.contains(self.id))
            .unwrap_or(false)
    }

    /// Stop receiving and release the registration.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(manager) = self.manager.take().and_then(|weak| weak.upgrade()) {
            manager.unsubscribe(self.id);
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("queued", &self.receiver.len())
            .finish()
    }
}
