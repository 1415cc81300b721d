// src/application/state.rs

use std::sync::Arc;

use crate::application::config::Configuration;
use crate::db::ConnectionPool;
use crate::events::EventBus;
use crate::repositories::{
    ClassificationRepository, ImageRepository, SqliteClassificationRepository,
    SqliteImageRepository,
};
use crate::services::{
    BreedQueryService, CandidateSelector, CatalogService, ResolutionRules, ResolutionService,
    StatisticsService, VocabularyService,
};

/// Everything a message handler needs.
/// All fields are Arc-wrapped so reply tasks can share them.
pub struct AppState {
    pub config: Arc<Configuration>,
    pub event_bus: Arc<EventBus>,
    pub vocabulary_service: Arc<VocabularyService>,
    pub breed_query_service: Arc<BreedQueryService>,
    pub statistics_service: Arc<StatisticsService>,
    pub catalog_service: Arc<CatalogService>,
}

impl AppState {
    /// Wire the services over a SQLite pool
    pub fn new(config: Configuration, pool: Arc<ConnectionPool>) -> Self {
        Self::assemble(
            config,
            Arc::new(SqliteImageRepository::new(Arc::clone(&pool))),
            Arc::new(SqliteClassificationRepository::new(pool)),
            None,
        )
    }

    /// Wire the services over arbitrary repositories.
    /// `selector_seed` makes image selection reproducible.
    pub fn assemble(
        config: Configuration,
        image_repo: Arc<dyn ImageRepository>,
        classification_repo: Arc<dyn ClassificationRepository>,
        selector_seed: Option<u64>,
    ) -> Self {
        let event_bus = Arc::new(EventBus::new());

        let vocabulary_service = Arc::new(VocabularyService::new(
            Arc::clone(&classification_repo),
            Arc::clone(&event_bus),
            config.minimum_class_confidence,
        ));

        let resolution_service = Arc::new(ResolutionService::new(
            Arc::clone(&event_bus),
            ResolutionRules::new(config.acceptance_threshold),
        ));

        let selector = Arc::new(match selector_seed {
            Some(seed) => CandidateSelector::with_seed(Arc::clone(&event_bus), seed),
            None => CandidateSelector::new(Arc::clone(&event_bus)),
        });

        let breed_query_service = Arc::new(BreedQueryService::new(
            Arc::clone(&classification_repo),
            Arc::clone(&vocabulary_service),
            resolution_service,
            selector,
            config.store_timeout(),
        ));

        let catalog_service = Arc::new(CatalogService::new(Arc::clone(&image_repo)));

        let statistics_service = Arc::new(StatisticsService::new(
            image_repo,
            classification_repo,
            Arc::clone(&vocabulary_service),
            Arc::clone(&event_bus),
        ));
        statistics_service.register_event_handlers();

        Self {
            config: Arc::new(config),
            event_bus,
            vocabulary_service,
            breed_query_service,
            statistics_service,
            catalog_service,
        }
    }
}
