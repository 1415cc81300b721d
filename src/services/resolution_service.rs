// src/services/resolution_service.rs
//
// Resolution Service
//
// Turns raw query text into a known breed label.
//
// CRITICAL RULES:
// - Works on the index it is handed; never reads the store
// - Exact label match short-circuits with distance 0
// - Otherwise every label is scored; ties go to the lexicographically smallest label
// - Acceptance is a separate decision (ResolutionRules::accepts)
// - Deterministic: same query + same index → same result
// - Emits BreedResolved / BreedRejected

use std::sync::Arc;

use crate::domain::{
    levenshtein, normalize_label, DomainError, DomainResult, ResolutionResult, VocabularyIndex,
};
use crate::events::{BreedRejected, BreedResolved, EventBus};

/// Distance from which a fuzzy match is no longer accepted
pub const DEFAULT_ACCEPTANCE_THRESHOLD: usize = 10;

// ============================================================================
// RESOLUTION RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionRules {
    /// A match is accepted iff its distance is strictly below this value
    pub acceptance_threshold: usize,
}

impl Default for ResolutionRules {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}

impl ResolutionRules {
    pub fn new(acceptance_threshold: usize) -> Self {
        Self {
            acceptance_threshold,
        }
    }

    pub fn accepts(&self, distance: usize) -> bool {
        distance < self.acceptance_threshold
    }

    /// Closest label by edit distance.
    ///
    /// Labels come out of the index sorted, and only a strictly smaller
    /// distance replaces the current best, so the first label wins ties.
    pub fn closest_label<'a>(
        &self,
        query: &str,
        index: &'a VocabularyIndex,
    ) -> Option<(&'a str, usize)> {
        let mut best: Option<(&'a str, usize)> = None;

        for label in index.labels() {
            let distance = levenshtein(query, label);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((label, distance)),
            }
            if distance == 0 {
                break;
            }
        }

        best
    }
}

// ============================================================================
// RESOLUTION SERVICE
// ============================================================================

pub struct ResolutionService {
    event_bus: Arc<EventBus>,
    rules: ResolutionRules,
}

impl ResolutionService {
    pub fn new(event_bus: Arc<EventBus>, rules: ResolutionRules) -> Self {
        Self { event_bus, rules }
    }

    pub fn rules(&self) -> &ResolutionRules {
        &self.rules
    }

    /// Best match for `query` without any acceptance decision
    pub fn closest(&self, query: &str, index: &VocabularyIndex) -> DomainResult<ResolutionResult> {
        let query = normalize_label(query);

        if index.is_empty() {
            return Err(DomainError::EmptyVocabulary);
        }

        if let Some(class_id) = index.lookup(&query) {
            return Ok(ResolutionResult {
                label: query.clone(),
                query,
                distance: 0,
                class_id: class_id.to_string(),
            });
        }

        let (label, distance) = self
            .rules
            .closest_label(&query, index)
            .ok_or(DomainError::EmptyVocabulary)?;

        let class_id = index.lookup(label).ok_or_else(|| {
            DomainError::InvariantViolation(format!("label '{}' has no class", label))
        })?;

        Ok(ResolutionResult {
            query,
            label: label.to_string(),
            distance,
            class_id: class_id.to_string(),
        })
    }

    /// Resolve a query and apply the acceptance threshold
    pub fn resolve(&self, query: &str, index: &VocabularyIndex) -> DomainResult<ResolutionResult> {
        let result = self.closest(query, index)?;

        if !self.rules.accepts(result.distance) {
            log::debug!(
                "Rejected '{}': closest '{}' at distance {}",
                result.query,
                result.label,
                result.distance
            );
            self.event_bus.emit(BreedRejected::new(
                result.query.clone(),
                result.label.clone(),
                result.distance,
            ));
            return Err(DomainError::MatchRejected {
                query: result.query,
                best_guess: result.label,
                distance: result.distance,
            });
        }

        self.event_bus.emit(BreedResolved::new(
            result.query.clone(),
            result.label.clone(),
            result.class_id.clone(),
            result.distance,
        ));

        Ok(result)
    }
}
