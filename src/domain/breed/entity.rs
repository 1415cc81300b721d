// src/domain/breed/entity.rs
use serde::{Deserialize, Serialize};

/// Separator used by the store to join several aliases into one class name
pub const ALIAS_SEPARATOR: &str = ", ";

/// A resolvable breed class as supplied by the store.
///
/// `class_name` may carry several aliases joined by [`ALIAS_SEPARATOR`],
/// e.g. `"Golden Retriever, Golden"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedClass {
    /// Opaque, stable identifier of the class
    pub class_id: String,

    /// Raw (possibly joined) human-readable name
    pub class_name: String,
}

impl BreedClass {
    pub fn new(class_id: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            class_name: class_name.into(),
        }
    }

    /// Individual aliases, trimmed, in store order. Empty fragments are skipped.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.class_name
            .split(ALIAS_SEPARATOR)
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
    }
}

/// An image that belongs to a breed class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMember {
    /// Locator of the media item (filename relative to the image root)
    pub filename: String,

    /// How strongly the image belongs to its class, in [0, 1]
    pub confidence: f64,
}

impl ClassMember {
    pub fn new(filename: impl Into<String>, confidence: f64) -> Self {
        Self {
            filename: filename.into(),
            confidence,
        }
    }

    /// Whether this member passes the given confidence floor
    pub fn is_eligible(&self, min_confidence: f64) -> bool {
        self.confidence >= min_confidence
    }
}

/// A stored image row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub image_id: String,
    pub filename: String,
}

impl Image {
    pub fn new(image_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            filename: filename.into(),
        }
    }
}

/// A stored classification: one image labelled with one class and a probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub image_id: String,
    pub class_id: String,
    pub class_name: String,
    pub probability: f64,
}
