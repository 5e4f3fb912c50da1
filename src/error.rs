//! Error types for the keyboard catalog.

use crate::types::{KeyboardId, ManufacturerId};
use thiserror::Error;

/// Main error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Keyboard not found: {0}")]
    KeyboardNotFound(KeyboardId),

    #[error("Manufacturer not found: {0}")]
    ManufacturerNotFound(ManufacturerId),

    #[error("Keyboard {keyboard} belongs to manufacturer {expected}, update names {got}")]
    ManufacturerMismatch {
        keyboard: KeyboardId,
        expected: ManufacturerId,
        got: ManufacturerId,
    },

    #[error("Invalid image URL {url:?}: {reason}")]
    InvalidImageUrl { url: String, reason: String },

    #[error("Empty {0} name")]
    EmptyName(&'static str),

    #[error("Duplicate keyboard id: {0}")]
    DuplicateKeyboard(KeyboardId),

    #[error("Duplicate manufacturer id: {0}")]
    DuplicateManufacturer(ManufacturerId),

    #[error("Keyboard {keyboard} references unknown manufacturer {manufacturer}")]
    UnknownManufacturer {
        keyboard: KeyboardId,
        manufacturer: ManufacturerId,
    },

    #[error("No keyboard is selected")]
    NoSelection,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Deserialization(e.to_string())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
