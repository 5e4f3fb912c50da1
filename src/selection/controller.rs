//! Selection state machine.

use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;
use crate::types::{Keyboard, KeyboardId};
use tracing::debug;

use super::request::SelectionRequest;

/// Detail state for a list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(Keyboard),
}

impl Selection {
    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(keyboard) => Some(keyboard),
        }
    }

    pub fn id(&self) -> Option<KeyboardId> {
        self.keyboard().map(Keyboard::id)
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

/// Resolves selection requests against the last observed collection.
///
/// Invariant: a `Selected` record is always present, by id, in
/// `collection`.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    selection: Selection,
    collection: Vec<Keyboard>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `request` against `collection`.
    ///
    /// Only the first requested key counts. A key that is not in the
    /// collection is a miss and clears the selection.
    pub fn request(
        &mut self,
        request: impl Into<SelectionRequest>,
        collection: &[Keyboard],
    ) -> &Selection {
        self.collection = collection.to_vec();
        self.select(request)
    }

    /// Resolve `request` against the last observed collection.
    pub fn select(&mut self, request: impl Into<SelectionRequest>) -> &Selection {
        let request = request.into();

        self.selection = match request.first().and_then(|id| self.find(id)) {
            Some(keyboard) => Selection::Selected(keyboard.clone()),
            None => Selection::NoSelection,
        };

        if request.len() > 1 {
            debug!(
                requested = request.len(),
                honored = ?self.selection.id(),
                "multi-key selection normalized to first key"
            );
        }

        &self.selection
    }

    /// Take a new collection. The selected record is refreshed to its new
    /// value, or dropped if its id is gone.
    pub fn observe(&mut self, collection: &[Keyboard]) -> &Selection {
        self.collection = collection.to_vec();

        if let Some(id) = self.selection.id() {
            self.selection = match self.find(id) {
                Some(keyboard) => Selection::Selected(keyboard.clone()),
                None => {
                    debug!(keyboard = %id, "selected keyboard vanished from collection");
                    Selection::NoSelection
                }
            };
        }

        &self.selection
    }

    /// Flip the favorite flag of the selected record in the store.
    ///
    /// The store flips its current record, not this controller's copy, so
    /// a change made elsewhere since the last `observe` is not undone. On
    /// success the selection and its collection slot take the stored
    /// value; on failure nothing changes here and the store error is
    /// returned.
    pub fn toggle_favorite(&mut self, store: &CatalogStore) -> Result<&Keyboard> {
        let id = self.selection.id().ok_or(CatalogError::NoSelection)?;
        let toggled = store.toggle_favorite(id)?;

        if let Some(slot) = self.collection.iter_mut().find(|k| k.id() == id) {
            *slot = toggled.clone();
        }
        self.selection = Selection::Selected(toggled);

        self.selection.keyboard().ok_or(CatalogError::NoSelection)
    }

    /// Clear the selection without touching the collection.
    pub fn clear(&mut self) {
        self.selection = Selection::NoSelection;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The normalized selection: empty or a single key.
    pub fn selected_key(&self) -> Option<KeyboardId> {
        self.selection.id()
    }

    /// Collection the controller last observed.
    pub fn collection(&self) -> &[Keyboard] {
        &self.collection
    }

    fn find(&self, id: KeyboardId) -> Option<&Keyboard> {
        self.collection.iter().find(|k| k.id() == id)
    }
}
