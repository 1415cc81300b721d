// src/domain/resolution/value_objects.rs
//
// Resolution Value Objects
//
// Pure, immutable data describing the outcome of a breed query.
//
// CRITICAL INVARIANTS:
// - No side effects
// - No I/O operations
// - Not persisted: consumed by the reply formatter or discarded

use serde::{Deserialize, Serialize};

use crate::domain::breed::ClassMember;

// ============================================================================
// RESOLUTION RESULT
// ============================================================================

/// Best match of a query against the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// The normalized query that was resolved
    pub query: String,

    /// Closest known label
    pub label: String,

    /// Edit distance between query and label (0 = exact match)
    pub distance: usize,

    /// Identifier the label maps to
    pub class_id: String,
}

impl ResolutionResult {
    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }
}

// ============================================================================
// SELECTED IMAGE
// ============================================================================

/// A successfully answered query: breed resolved and one image picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedImage {
    pub label: String,
    pub class_id: String,
    pub distance: usize,
    pub filename: String,
    pub confidence: f64,
}

impl SelectedImage {
    pub fn new(resolution: ResolutionResult, member: ClassMember) -> Self {
        Self {
            label: resolution.label,
            class_id: resolution.class_id,
            distance: resolution.distance,
            filename: member.filename,
            confidence: member.confidence,
        }
    }
}
