// src/events/types.rs
//
// All bot events.
// Each event is an immutable fact about a query or the vocabulary.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ty, $name:literal) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                $name
            }
        }
    };
}

// ============================================================================
// RESOLUTION EVENTS
// ============================================================================

/// Emitted when a query is accepted as a known breed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query: String,
    pub label: String,
    pub class_id: String,
    pub distance: usize,
}

impl BreedResolved {
    pub fn new(query: String, label: String, class_id: String, distance: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query,
            label,
            class_id,
            distance,
        }
    }
}

impl_domain_event!(BreedResolved, "BreedResolved");

/// Emitted when the closest label is beyond the acceptance threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query: String,
    pub best_guess: String,
    pub distance: usize,
}

impl BreedRejected {
    pub fn new(query: String, best_guess: String, distance: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query,
            best_guess,
            distance,
        }
    }
}

impl_domain_event!(BreedRejected, "BreedRejected");

// ============================================================================
// SELECTION EVENTS
// ============================================================================

/// Emitted when an image is picked for a resolved breed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSelected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub class_id: String,
    pub filename: String,
    pub confidence: f64,
    /// Size of the eligible population the image was drawn from
    pub eligible_count: usize,
}

impl ImageSelected {
    pub fn new(class_id: String, filename: String, confidence: f64, eligible_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            class_id,
            filename,
            confidence,
            eligible_count,
        }
    }
}

impl_domain_event!(ImageSelected, "ImageSelected");

/// Emitted when a resolved breed has no image above the confidence floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoEligibleImages {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub class_id: String,
    pub label: String,
    pub min_confidence: f64,
}

impl NoEligibleImages {
    pub fn new(class_id: String, label: String, min_confidence: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            class_id,
            label,
            min_confidence,
        }
    }
}

impl_domain_event!(NoEligibleImages, "NoEligibleImages");

// ============================================================================
// VOCABULARY EVENTS
// ============================================================================

/// Emitted after the vocabulary index was rebuilt and swapped in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub label_count: usize,
    pub class_count: usize,
    pub collision_count: usize,
}

impl VocabularyRefreshed {
    pub fn new(label_count: usize, class_count: usize, collision_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            label_count,
            class_count,
            collision_count,
        }
    }
}

impl_domain_event!(VocabularyRefreshed, "VocabularyRefreshed");
