//! Vocabulary Invariants:
//!
//! 1. Every label maps to exactly one class identifier
//! 2. A class identifier may be reachable through several labels
//! 3. Labels are normalized with `normalize_label`
//! 4. A built index is never mutated; refresh replaces it

pub mod index;
pub use index::{normalize_label, AliasCollision, VocabularyIndex};
