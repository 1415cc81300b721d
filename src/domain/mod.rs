// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod breed;
pub mod resolution;
pub mod statistics;
pub mod vocabulary;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Breed Domain
pub use breed::{
    validate_breed_class, validate_class_member, validate_classification, BreedClass,
    ClassMember, Classification, Image,
};

// Vocabulary
pub use vocabulary::{normalize_label, AliasCollision, VocabularyIndex};

// Resolution
pub use resolution::{levenshtein, ResolutionResult, SelectedImage};

// Statistics Domain (Derived Data)
pub use statistics::{BotStatistics, QueryCounters};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent the outcomes a query can end in besides success
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Resolution was attempted with no known labels
    #[error("No breeds are known")]
    EmptyVocabulary,

    /// The breed is known but no image passes the confidence floor
    #[error("No eligible images for '{label}'")]
    NoEligibleMembers { label: String },

    /// The best match is too far from the query
    #[error("'{query}' is not a known breed (closest: '{best_guess}', distance {distance})")]
    MatchRejected {
        query: String,
        best_guess: String,
        distance: usize,
    },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
