//! Application state for a master/detail catalog browser.
//!
//! Plain owned state, no rendering: a [`CatalogApp`] holds one
//! [`KeyboardList`] per manufacturer, addressed by manufacturer id, plus the
//! sidebar selection and an optional presented destination.

mod catalog;
mod list;

pub use catalog::{AppInfo, CatalogApp, Destination};
pub use list::KeyboardList;
