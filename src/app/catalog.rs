//! Top-level browser state.

use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;
use crate::types::ManufacturerId;
use tracing::debug;

use super::list::KeyboardList;

const ABOUT_TEXT: &str =
    "Browse classic computer keyboards by manufacturer and keep track of your favorites.";

/// The "about" sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub about: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            about: ABOUT_TEXT.to_string(),
        }
    }
}

/// Something presented over the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    AppInfo(AppInfo),
}

/// Browser state: one list per manufacturer, a sidebar selection and an
/// optional presented destination.
#[derive(Debug)]
pub struct CatalogApp {
    lists: Vec<KeyboardList>,
    destination_tag: Option<ManufacturerId>,
    destination: Option<Destination>,
}

impl CatalogApp {
    /// One list per store manufacturer, in store order. The first
    /// manufacturer starts selected.
    pub fn new(store: &CatalogStore) -> Self {
        let lists: Vec<_> = store
            .manufacturers()
            .iter()
            .cloned()
            .map(KeyboardList::new)
            .collect();
        let destination_tag = lists.first().map(|list| list.manufacturer().id());

        Self {
            lists,
            destination_tag,
            destination: None,
        }
    }

    // --- Sidebar ---

    /// Select a manufacturer in the sidebar, or clear the selection.
    pub fn select_manufacturer(&mut self, id: Option<ManufacturerId>) -> Result<()> {
        if let Some(id) = id {
            self.position(id)?;
        }
        self.destination_tag = id;
        Ok(())
    }

    pub fn destination_tag(&self) -> Option<ManufacturerId> {
        self.destination_tag
    }

    /// List shown in the content column.
    pub fn current_list(&self) -> Option<&KeyboardList> {
        let id = self.destination_tag?;
        self.list(id).ok()
    }

    pub fn current_list_mut(&mut self) -> Option<&mut KeyboardList> {
        let id = self.destination_tag?;
        self.list_mut(id).ok()
    }

    // --- Lists ---

    pub fn lists(&self) -> &[KeyboardList] {
        &self.lists
    }

    pub fn list(&self, id: ManufacturerId) -> Result<&KeyboardList> {
        let position = self.position(id)?;
        Ok(&self.lists[position])
    }

    pub fn list_mut(&mut self, id: ManufacturerId) -> Result<&mut KeyboardList> {
        let position = self.position(id)?;
        Ok(&mut self.lists[position])
    }

    /// Start every list's subscription.
    pub fn start_all(&mut self, store: &CatalogStore) {
        for list in &mut self.lists {
            list.start(store);
        }
    }

    /// Apply pending snapshots everywhere. Returns how many lists changed.
    pub fn sync_all(&mut self) -> usize {
        self.lists
            .iter_mut()
            .map(KeyboardList::sync)
            .filter(|&changed| changed)
            .count()
    }

    pub fn stop_all(&mut self) {
        for list in &mut self.lists {
            list.stop();
        }
    }

    // --- Destination ---

    pub fn navigate_to_app_info(&mut self) {
        debug!("presenting app info");
        self.destination = Some(Destination::AppInfo(AppInfo::default()));
    }

    pub fn dismiss_destination(&mut self) {
        self.destination = None;
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    fn position(&self, id: ManufacturerId) -> Result<usize> {
        self.lists
            .iter()
            .position(|list| list.manufacturer().id() == id)
            .ok_or(CatalogError::ManufacturerNotFound(id))
    }
}
