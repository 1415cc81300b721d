// src/domain/resolution/mod.rs
//
// Resolution Domain
//
// Value objects describing the outcome of a breed query, plus the
// edit-distance metric used to score inexact matches.
//
// CRITICAL RULES:
// - All types are pure value objects (immutable)
// - No side effects
// - No persistence
// - No event emission (that's the service's job)

pub mod edit_distance;
pub mod value_objects;

pub use edit_distance::levenshtein;
pub use value_objects::{ResolutionResult, SelectedImage};
