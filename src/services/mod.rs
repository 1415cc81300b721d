// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod breed_query_service;
pub mod catalog_service;
pub mod resolution_service;
pub mod selection_service;
pub mod statistics_service;
pub mod vocabulary_service;


// Re-export all services and their types
pub use breed_query_service::{
    with_store_deadline,
    BreedQueryService,
};

pub use catalog_service::{
    CatalogService,
    ClassLabel,
    ImageRecord,
    ImportSummary,
};

pub use resolution_service::{
    ResolutionRules,
    ResolutionService,
    DEFAULT_ACCEPTANCE_THRESHOLD,
};

pub use selection_service::{
    CandidateSelector,
};

pub use statistics_service::{
    StatisticsService,
};

pub use vocabulary_service::{
    VocabularyService,
};
