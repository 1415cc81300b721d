// src/lib.rs
// Dogbot - answers dog breed queries in chat with a matching picture
//
// Architecture:
// - Domain-centric: breed vocabulary, matching and selection rules live in domain/services
// - Event-driven: resolution and selection outcomes are reported on an EventBus
// - Explicit: store calls run off the runtime with a deadline, no hidden retries
// - Application Layer: command parsing, replies and the chat loop
// - Integrations: Slack RTM and console transports

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    levenshtein,
    normalize_label,
    validate_breed_class,
    validate_class_member,
    validate_classification,
    AliasCollision,
    BotStatistics,
    // Breed
    BreedClass,
    ClassMember,
    Classification,
    DomainError,
    DomainResult,
    Image,
    QueryCounters,
    // Resolution
    ResolutionResult,
    SelectedImage,
    // Vocabulary
    VocabularyIndex,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    BreedRejected,
    BreedResolved,
    DomainEvent,
    EventBus,
    EventLogEntry,
    ImageSelected,
    NoEligibleImages,
    VocabularyRefreshed,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_memory_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ClassificationRepository,
    ImageRepository,
    SqliteClassificationRepository,
    SqliteImageRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    with_store_deadline,
    BreedQueryService,
    CandidateSelector,
    CatalogService,
    ClassLabel,
    ImageRecord,
    ImportSummary,
    ResolutionRules,
    ResolutionService,
    StatisticsService,
    VocabularyService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{respond, AppState, Bot, BotCommand, Configuration};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    ConsoleSink, ConsoleSource, InboundMessage, MessageSink, MessageSource, SlackClient,
};
