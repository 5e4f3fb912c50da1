//! Subscription system for live catalog views.
//!
//! Each subscription is a filtered, push-based sequence of keyboard
//! snapshots:
//! - One snapshot is queued immediately with the current collection
//! - A fresh filtered snapshot follows every applied update
//! - Snapshots arrive in revision order and are never skipped
//!
//! # Example
//!
//! ```ignore
//! let store = CatalogStore::with_defaults();
//! let apple = store.manufacturers()[0].id();
//!
//! let handle = store.subscribe(apple);
//! for snapshot in handle.iter() {
//!     println!("{:?}: {} keyboards", snapshot.revision, snapshot.keyboards.len());
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    KeyboardSnapshot, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
};
