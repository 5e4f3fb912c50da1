//! Per-manufacturer keyboard list.

use crate::selection::{Selection, SelectionController, SelectionRequest};
use crate::store::CatalogStore;
use crate::subscriptions::{KeyboardSnapshot, SubscriptionHandle};
use crate::types::{Keyboard, Manufacturer, Revision};
use tracing::{debug, warn};

/// List state for one manufacturer.
///
/// The selection controller owns the collection, so the list, its
/// sections and the detail record always agree.
#[derive(Debug)]
pub struct KeyboardList {
    manufacturer: Manufacturer,
    revision: Option<Revision>,
    selection: SelectionController,
    subscription: Option<SubscriptionHandle>,
}

impl KeyboardList {
    pub fn new(manufacturer: Manufacturer) -> Self {
        Self {
            manufacturer,
            revision: None,
            selection: SelectionController::new(),
            subscription: None,
        }
    }

    /// Start observing the store and apply the initial snapshot.
    ///
    /// Restarting replaces the previous subscription. Snapshots queue up
    /// until consumed, so call [`sync`](Self::sync) regularly while live.
    pub fn start(&mut self, store: &CatalogStore) {
        self.subscription = Some(store.subscribe(self.manufacturer.id()));
        self.sync();
    }

    /// Cancel the live subscription. Current state is kept.
    pub fn stop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            handle.cancel();
        }
    }

    pub fn is_live(&self) -> bool {
        self.subscription.is_some()
    }

    /// Apply the newest pending snapshot, if any. Returns true if state
    /// changed.
    pub fn sync(&mut self) -> bool {
        let latest = self.subscription.as_ref().and_then(SubscriptionHandle::latest);
        match latest {
            Some(snapshot) => self.set_keyboards(snapshot),
            None => false,
        }
    }

    /// Replace the collection with `snapshot`. Snapshots older than the
    /// one already applied are ignored.
    pub fn set_keyboards(&mut self, snapshot: KeyboardSnapshot) -> bool {
        if self.revision.is_some_and(|current| snapshot.revision < current) {
            debug!(
                manufacturer = self.manufacturer.name(),
                stale = ?snapshot.revision,
                "ignoring stale snapshot"
            );
            return false;
        }

        self.revision = Some(snapshot.revision);
        self.selection.observe(&snapshot.keyboards);
        true
    }

    /// Select from the list. Only the first key is honored.
    pub fn set_selection(&mut self, request: impl Into<SelectionRequest>) -> &Selection {
        self.selection.select(request)
    }

    /// Flip the favorite flag of the detail record.
    ///
    /// Failures are logged and otherwise ignored; the list is left as it
    /// was.
    pub fn toggle_favorite(&mut self, store: &CatalogStore) {
        match self.selection.toggle_favorite(store) {
            Ok(keyboard) => {
                debug!(
                    keyboard = %keyboard.id(),
                    favorite = keyboard.is_favorite(),
                    "favorite toggled"
                );
            }
            Err(e) => {
                warn!(
                    manufacturer = self.manufacturer.name(),
                    error = %e,
                    "favorite toggle dropped"
                );
            }
        }
    }

    /// Detail record, if one is selected.
    pub fn details(&self) -> Option<&Keyboard> {
        self.selection.selection().keyboard()
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    pub fn keyboards(&self) -> &[Keyboard] {
        self.selection.collection()
    }

    pub fn revision(&self) -> Option<Revision> {
        self.revision
    }

    /// "Favorites" section, in list order.
    pub fn favorites(&self) -> impl Iterator<Item = &Keyboard> {
        self.keyboards().iter().filter(|k| k.is_favorite())
    }

    /// "Keyboards" section, in list order.
    pub fn non_favorites(&self) -> impl Iterator<Item = &Keyboard> {
        self.keyboards().iter().filter(|k| !k.is_favorite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ibm_list(store: &CatalogStore) -> KeyboardList {
        let ibm = store
            .manufacturers()
            .iter()
            .find(|m| m.name() == "IBM")
            .cloned()
            .unwrap();
        KeyboardList::new(ibm)
    }

    #[test]
    fn test_start_loads_initial_snapshot() {
        let store = CatalogStore::with_defaults();
        let mut list = ibm_list(&store);
        assert!(list.keyboards().is_empty());

        list.start(&store);

        assert!(list.is_live());
        assert_eq!(list.revision(), Some(Revision(0)));
        let names: Vec<_> = list.keyboards().iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["Model M", "Model F"]);
    }

    #[test]
    fn test_sections_follow_favorites() {
        let store = CatalogStore::with_defaults();
        let mut list = ibm_list(&store);
        list.start(&store);

        let model_f = list.keyboards()[1].id();
        list.set_selection(model_f);
        list.toggle_favorite(&store);
        assert!(list.sync());

        let favorites: Vec<_> = list.favorites().map(|k| k.name()).collect();
        let others: Vec<_> = list.non_favorites().map(|k| k.name()).collect();
        assert_eq!(favorites, vec!["Model F"]);
        assert_eq!(others, vec!["Model M"]);
        assert!(list.details().unwrap().is_favorite());
    }

    #[test]
    fn test_reselect_after_toggle_shows_stored_value() {
        let store = CatalogStore::with_defaults();
        let mut list = ibm_list(&store);
        list.start(&store);

        let model_m = list.keyboards()[0].id();
        list.set_selection(model_m);
        list.toggle_favorite(&store);

        // No sync in between: the list already holds the toggled record.
        list.set_selection(model_m);
        let stored = store.keyboard(model_m).unwrap();
        assert!(stored.is_favorite());
        assert_eq!(list.details(), Some(&stored));
        assert_eq!(list.favorites().map(|k| k.id()).collect::<Vec<_>>(), vec![model_m]);
    }

    #[test]
    fn test_toggle_after_external_change() {
        let store = CatalogStore::with_defaults();
        let mut list = ibm_list(&store);
        list.start(&store);

        let model_m = list.keyboards()[0].id();
        list.set_selection(model_m);
        store.toggle_favorite(model_m).unwrap();

        list.toggle_favorite(&store);

        assert!(!store.keyboard(model_m).unwrap().is_favorite());
        assert!(!list.details().unwrap().is_favorite());
        assert_eq!(store.revision(), Revision(2));
    }

    #[test]
    fn test_stale_snapshot_ignored() {
        let store = CatalogStore::with_defaults();
        let mut list = ibm_list(&store);
        list.start(&store);

        let fresh = list.keyboards().to_vec();
        let stale = KeyboardSnapshot {
            revision: Revision(0),
            keyboards: Vec::new(),
        };
        list.set_keyboards(KeyboardSnapshot {
            revision: Revision(4),
            keyboards: fresh.clone(),
        });

        assert!(!list.set_keyboards(stale));
        assert_eq!(list.keyboards(), fresh.as_slice());
    }

    #[test]
    fn test_sync_drains_queued_snapshots() {
        let store = CatalogStore::with_defaults();
        let mut list = ibm_list(&store);
        list.start(&store);

        let model_m = list.keyboards()[0].id();
        for _ in 0..3 {
            store.toggle_favorite(model_m).unwrap();
        }

        assert!(list.sync());
        assert_eq!(list.revision(), Some(Revision(3)));
        assert!(list.keyboards()[0].is_favorite());
        assert!(!list.sync());
    }

    #[test]
    fn test_stop_releases_subscription() {
        let store = CatalogStore::with_defaults();
        let mut list = ibm_list(&store);
        list.start(&store);
        assert_eq!(store.subscription_count(), 1);

        list.stop();
        assert!(!list.is_live());
        assert_eq!(store.subscription_count(), 0);
        assert!(!list.sync());
    }
}
