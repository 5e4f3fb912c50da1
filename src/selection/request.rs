//! Selection requests.

use crate::types::KeyboardId;

/// Keys a list asked to select, in the order they were supplied.
///
/// Duplicates collapse onto their first occurrence, so the honored key is
/// always the first one the caller named.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    keys: Vec<KeyboardId>,
}

impl SelectionRequest {
    /// Clear the selection.
    pub fn none() -> Self {
        Self::default()
    }

    /// Select a single keyboard.
    pub fn one(id: KeyboardId) -> Self {
        Self { keys: vec![id] }
    }

    /// Select from several keys; only the first is honored.
    pub fn from_keys(keys: impl IntoIterator<Item = KeyboardId>) -> Self {
        let mut request = Self::none();
        for key in keys {
            if !request.keys.contains(&key) {
                request.keys.push(key);
            }
        }
        request
    }

    /// The key that will be honored.
    pub fn first(&self) -> Option<KeyboardId> {
        self.keys.first().copied()
    }

    pub fn keys(&self) -> &[KeyboardId] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

impl From<Option<KeyboardId>> for SelectionRequest {
    fn from(id: Option<KeyboardId>) -> Self {
        id.map(Self::one).unwrap_or_default()
    }
}

impl From<KeyboardId> for SelectionRequest {
    fn from(id: KeyboardId) -> Self {
        Self::one(id)
    }
}

impl FromIterator<KeyboardId> for SelectionRequest {
    fn from_iter<I: IntoIterator<Item = KeyboardId>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys_dedups_and_keeps_order() {
        let a = KeyboardId::new();
        let b = KeyboardId::new();

        let request = SelectionRequest::from_keys([b, a, b]);
        assert_eq!(request.keys(), &[b, a]);
        assert_eq!(request.first(), Some(b));
    }

    #[test]
    fn test_from_option() {
        assert!(SelectionRequest::from(None).is_empty());

        let id = KeyboardId::new();
        assert_eq!(SelectionRequest::from(Some(id)).first(), Some(id));
    }
}
