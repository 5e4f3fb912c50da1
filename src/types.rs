//! Core types for the keyboard catalog.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Unique identifier for a manufacturer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManufacturerId(pub Uuid);

impl ManufacturerId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        ManufacturerId(Uuid::new_v4())
    }
}

impl Default for ManufacturerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManufacturerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ManufacturerId({})", self.0)
    }
}

impl fmt::Display for ManufacturerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a keyboard.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyboardId(pub Uuid);

impl KeyboardId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        KeyboardId(Uuid::new_v4())
    }
}

impl Default for KeyboardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyboardId({})", self.0)
    }
}

impl fmt::Display for KeyboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store version. Zero is the seeded state; every applied update adds one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Revision(pub u64);

impl fmt::Debug for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rev({})", self.0)
    }
}

impl Revision {
    pub fn next(self) -> Self {
        Revision(self.0 + 1)
    }
}

/// A keyboard brand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Manufacturer {
    id: ManufacturerId,
    name: String,
}

impl Manufacturer {
    /// Create a manufacturer with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_id(ManufacturerId::new(), name)
    }

    /// Create a manufacturer with a caller-supplied id.
    pub fn with_id(id: ManufacturerId, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName("manufacturer"));
        }
        Ok(Self { id, name })
    }

    pub fn id(&self) -> ManufacturerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A catalog item belonging to exactly one manufacturer.
///
/// Everything except the favorite flag is fixed at construction. The image
/// URL is parsed up front, so a `Keyboard` never holds a malformed locator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyboard {
    id: KeyboardId,
    manufacturer_id: ManufacturerId,
    name: String,
    description: String,
    image_url: Url,
    #[serde(default)]
    is_favorite: bool,
}

impl Keyboard {
    /// Create a keyboard with a freshly generated id.
    pub fn new(
        manufacturer_id: ManufacturerId,
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: &str,
    ) -> Result<Self> {
        Self::with_id(KeyboardId::new(), manufacturer_id, name, description, image_url)
    }

    /// Create a keyboard with a caller-supplied id.
    pub fn with_id(
        id: KeyboardId,
        manufacturer_id: ManufacturerId,
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: &str,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName("keyboard"));
        }

        let image_url = Url::parse(image_url).map_err(|e| CatalogError::InvalidImageUrl {
            url: image_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            id,
            manufacturer_id,
            name,
            description: description.into(),
            image_url,
            is_favorite: false,
        })
    }

    pub fn id(&self) -> KeyboardId {
        self.id
    }

    pub fn manufacturer_id(&self) -> ManufacturerId {
        self.manufacturer_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &Url {
        &self.image_url
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        self.is_favorite = favorite;
    }

    /// Copy of this record with the favorite flag set.
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }

    /// Copy of this record with the favorite flag flipped.
    pub fn toggled_favorite(&self) -> Self {
        self.clone().with_favorite(!self.is_favorite)
    }
}

/// Point-in-time counts for the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub manufacturer_count: usize,
    pub keyboard_count: usize,
    pub favorite_count: usize,
    pub subscription_count: usize,
    pub revision: Revision,
}
