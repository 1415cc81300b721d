// src/services/statistics_service.rs
//
// Statistics Service
//
// Session counters fed by bot events, combined with store facts on demand.
// Counters live behind the service instance; nothing here is global.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{BotStatistics, QueryCounters};
use crate::error::AppResult;
use crate::events::{
    BreedRejected, BreedResolved, EventBus, ImageSelected, NoEligibleImages, VocabularyRefreshed,
};
use crate::repositories::{ClassificationRepository, ImageRepository};
use crate::services::vocabulary_service::VocabularyService;

#[derive(Debug, Default)]
struct CounterCells {
    resolved: AtomicU64,
    exact_matches: AtomicU64,
    rejected: AtomicU64,
    images_served: AtomicU64,
    no_eligible_images: AtomicU64,
    vocabulary_refreshes: AtomicU64,
}

impl CounterCells {
    fn load(&self) -> QueryCounters {
        QueryCounters {
            resolved: self.resolved.load(Ordering::Relaxed),
            exact_matches: self.exact_matches.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            images_served: self.images_served.load(Ordering::Relaxed),
            no_eligible_images: self.no_eligible_images.load(Ordering::Relaxed),
            vocabulary_refreshes: self.vocabulary_refreshes.load(Ordering::Relaxed),
        }
    }
}

pub struct StatisticsService {
    image_repo: Arc<dyn ImageRepository>,
    classification_repo: Arc<dyn ClassificationRepository>,
    vocabulary: Arc<VocabularyService>,
    event_bus: Arc<EventBus>,
    counters: Arc<CounterCells>,
}

impl StatisticsService {
    pub fn new(
        image_repo: Arc<dyn ImageRepository>,
        classification_repo: Arc<dyn ClassificationRepository>,
        vocabulary: Arc<VocabularyService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            image_repo,
            classification_repo,
            vocabulary,
            event_bus,
            counters: Arc::new(CounterCells::default()),
        }
    }

    pub fn register_event_handlers(&self) {
        let counters = Arc::clone(&self.counters);
        self.event_bus.subscribe::<BreedResolved, _>(move |event| {
            counters.resolved.fetch_add(1, Ordering::Relaxed);
            if event.distance == 0 {
                counters.exact_matches.fetch_add(1, Ordering::Relaxed);
            }
        });

        let counters = Arc::clone(&self.counters);
        self.event_bus.subscribe::<BreedRejected, _>(move |_| {
            counters.rejected.fetch_add(1, Ordering::Relaxed);
        });

        let counters = Arc::clone(&self.counters);
        self.event_bus.subscribe::<ImageSelected, _>(move |_| {
            counters.images_served.fetch_add(1, Ordering::Relaxed);
        });

        let counters = Arc::clone(&self.counters);
        self.event_bus.subscribe::<NoEligibleImages, _>(move |_| {
            counters.no_eligible_images.fetch_add(1, Ordering::Relaxed);
        });

        let counters = Arc::clone(&self.counters);
        self.event_bus.subscribe::<VocabularyRefreshed, _>(move |_| {
            counters.vocabulary_refreshes.fetch_add(1, Ordering::Relaxed);
        });
    }

    /// Counters only; no store access
    pub fn counters(&self) -> QueryCounters {
        self.counters.load()
    }

    /// Full snapshot. Reads the store, so callers on the runtime should
    /// wrap it in `with_store_deadline`.
    pub fn snapshot(&self) -> AppResult<BotStatistics> {
        let index = self.vocabulary.current();

        Ok(BotStatistics {
            label_count: index.len(),
            class_count: index.class_count(),
            image_count: self.image_repo.count()?,
            average_confidence: self.classification_repo.average_confidence()?,
            counters: self.counters.load(),
        })
    }
}
