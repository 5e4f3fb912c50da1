//! List/detail selection.
//!
//! A [`SelectionController`] turns selection requests from a list into at
//! most one detail record, and keeps that record in step with the list's
//! collection as it changes.

mod controller;
mod request;

pub use controller::{Selection, SelectionController};
pub use request::SelectionRequest;
