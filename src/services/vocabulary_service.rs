// src/services/vocabulary_service.rs
//
// Vocabulary Service
//
// Owns the live label → class_id index and rebuilds it from the store.
//
// CRITICAL RULES:
// - The index is never patched in place; refresh builds a new one and swaps it
// - Readers clone the current Arc and keep a consistent view for a whole query
// - A failed refresh leaves the previous index in place
// - An empty vocabulary is a valid state (queries fail until data arrives)

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{validate_breed_class, BreedClass, VocabularyIndex};
use crate::error::AppResult;
use crate::events::{EventBus, VocabularyRefreshed};
use crate::repositories::ClassificationRepository;

pub struct VocabularyService {
    classification_repo: Arc<dyn ClassificationRepository>,
    event_bus: Arc<EventBus>,
    min_confidence: f64,
    current: RwLock<Arc<VocabularyIndex>>,
}

impl VocabularyService {
    /// Starts with an empty index; call `refresh` to load the store
    pub fn new(
        classification_repo: Arc<dyn ClassificationRepository>,
        event_bus: Arc<EventBus>,
        min_confidence: f64,
    ) -> Self {
        Self {
            classification_repo,
            event_bus,
            min_confidence,
            current: RwLock::new(Arc::new(VocabularyIndex::default())),
        }
    }

    /// Rebuild the index from the store and swap it in
    pub fn refresh(&self) -> AppResult<Arc<VocabularyIndex>> {
        let classes: Vec<BreedClass> = self
            .classification_repo
            .list_available_classes(self.min_confidence)?
            .into_iter()
            .filter(|class| match validate_breed_class(class) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Ignoring breed class row: {}", e);
                    false
                }
            })
            .collect();

        let index = Arc::new(VocabularyIndex::build(&classes));

        for collision in index.collisions() {
            log::warn!(
                "Alias '{}' moved from class {} to class {}",
                collision.label,
                collision.previous_class_id,
                collision.class_id
            );
        }

        if index.is_empty() {
            log::warn!("Vocabulary is empty; breed queries will fail until the store has data");
        } else {
            log::info!(
                "Vocabulary refreshed: {} labels across {} classes",
                index.len(),
                index.class_count()
            );
        }

        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = Arc::clone(&index);
        }

        self.event_bus.emit(VocabularyRefreshed::new(
            index.len(),
            index.class_count(),
            index.collisions().len(),
        ));

        Ok(index)
    }

    /// The index in effect right now
    pub fn current(&self) -> Arc<VocabularyIndex> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// All known labels, one per line
    pub fn listing(&self) -> String {
        self.current().listing()
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }
}
