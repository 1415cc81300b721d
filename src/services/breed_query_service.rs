// src/services/breed_query_service.rs
//
// Breed Query Service
//
// End-to-end flow for one query: resolve against the current vocabulary,
// fetch the breed's images from the store, pick one.
//
// CRITICAL RULES:
// - One vocabulary snapshot per query
// - Store calls run off the async runtime and are bounded by a deadline
// - A missed deadline is StoreUnavailable, never a domain error
// - No retries

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{validate_class_member, ClassMember, SelectedImage};
use crate::error::{AppError, AppResult};
use crate::repositories::ClassificationRepository;
use crate::services::resolution_service::ResolutionService;
use crate::services::selection_service::CandidateSelector;
use crate::services::vocabulary_service::VocabularyService;

/// Run a blocking store operation on the blocking pool, giving up after `deadline`.
///
/// On expiry the blocking call is left to finish in the background; its
/// result is discarded.
pub async fn with_store_deadline<T, F>(deadline: Duration, op: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(deadline, tokio::task::spawn_blocking(op)).await {
        Ok(joined) => joined?,
        Err(_) => Err(AppError::StoreUnavailable(format!(
            "no answer within {} ms",
            deadline.as_millis()
        ))),
    }
}

pub struct BreedQueryService {
    classification_repo: Arc<dyn ClassificationRepository>,
    vocabulary: Arc<VocabularyService>,
    resolver: Arc<ResolutionService>,
    selector: Arc<CandidateSelector>,
    store_timeout: Duration,
}

impl BreedQueryService {
    pub fn new(
        classification_repo: Arc<dyn ClassificationRepository>,
        vocabulary: Arc<VocabularyService>,
        resolver: Arc<ResolutionService>,
        selector: Arc<CandidateSelector>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            classification_repo,
            vocabulary,
            resolver,
            selector,
            store_timeout,
        }
    }

    /// Resolve `query` and pick an image for it
    pub async fn find_image(&self, query: &str) -> AppResult<SelectedImage> {
        let index = self.vocabulary.current();
        let resolution = self.resolver.resolve(query, &index)?;

        let min_confidence = self.vocabulary.min_confidence();
        let repo = Arc::clone(&self.classification_repo);
        let class_id = resolution.class_id.clone();
        let members = with_store_deadline(self.store_timeout, move || {
            repo.list_class_members(&class_id, min_confidence)
        })
        .await?;

        let members: Vec<ClassMember> = members
            .into_iter()
            .filter(|member| match validate_class_member(member) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Ignoring image row of class {}: {}", resolution.class_id, e);
                    false
                }
            })
            .collect();

        log::debug!(
            "'{}' -> '{}' ({}), {} candidate images",
            resolution.query,
            resolution.label,
            resolution.class_id,
            members.len()
        );

        Ok(self.selector.select(resolution, &members, min_confidence)?)
    }

    /// Rebuild the vocabulary from the store under the same deadline as queries.
    /// Returns the new label count.
    pub async fn refresh_vocabulary(&self) -> AppResult<usize> {
        let vocabulary = Arc::clone(&self.vocabulary);
        let index = with_store_deadline(self.store_timeout, move || vocabulary.refresh()).await?;
        Ok(index.len())
    }

    /// Known labels, one per line
    pub fn listing(&self) -> String {
        self.vocabulary.listing()
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}
