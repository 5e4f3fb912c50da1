//! # Keyboard Catalog
//!
//! A reactive, in-memory catalog of computer keyboards grouped by
//! manufacturer, with the state needed to drive a master/detail browser.
//!
//! ## Core Concepts
//!
//! - **Store**: the single owner of the keyboard collection; one writer at a time
//! - **Subscriptions**: live, manufacturer-filtered snapshot streams
//! - **Selection**: resolves list selection requests to one detail record
//! - **App**: per-manufacturer list state plus sidebar and sheet state
//!
//! ## Example
//!
//! ```ignore
//! use keyboard_catalog::{CatalogStore, SelectionController};
//!
//! let store = CatalogStore::with_defaults();
//! let ibm = store.manufacturers()[1].id();
//!
//! // Live view of IBM keyboards
//! let handle = store.subscribe(ibm);
//! let snapshot = handle.recv()?;
//!
//! // Select the first one and mark it as a favorite
//! let mut selection = SelectionController::new();
//! selection.request(snapshot.keyboards[0].id(), &snapshot.keyboards);
//! selection.toggle_favorite(&store)?;
//! ```

pub mod app;
pub mod error;
pub mod seed;
pub mod selection;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use app::{AppInfo, CatalogApp, Destination, KeyboardList};
pub use error::{CatalogError, Result};
pub use seed::CatalogSeed;
pub use selection::{Selection, SelectionController, SelectionRequest};
pub use store::{CatalogStore, SeedSource, StoreConfig};
pub use subscriptions::{
    KeyboardSnapshot, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    SubscriptionManager,
};
pub use types::*;
