// src/services/selection_service.rs
//
// Candidate Selection
//
// Picks one image for a resolved breed.
//
// CRITICAL RULES:
// - Only members with confidence >= floor are eligible
// - The pick is uniform over eligible members (not confidence-weighted)
// - The generator is shared behind a Mutex; one lock per pick
// - Emits ImageSelected / NoEligibleImages

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::{ClassMember, DomainError, DomainResult, ResolutionResult, SelectedImage};
use crate::events::{EventBus, ImageSelected, NoEligibleImages};

pub struct CandidateSelector {
    event_bus: Arc<EventBus>,
    rng: Mutex<StdRng>,
}

impl CandidateSelector {
    /// Selector seeded from OS entropy
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            event_bus,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible selector
    pub fn with_seed(event_bus: Arc<EventBus>, seed: u64) -> Self {
        Self {
            event_bus,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniformly pick one member above the floor
    pub fn select_member(
        &self,
        label: &str,
        members: &[ClassMember],
        min_confidence: f64,
    ) -> DomainResult<ClassMember> {
        let eligible: Vec<&ClassMember> = members
            .iter()
            .filter(|m| m.is_eligible(min_confidence))
            .collect();

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        eligible
            .choose(&mut *rng)
            .map(|m| (*m).clone())
            .ok_or_else(|| DomainError::NoEligibleMembers {
                label: label.to_string(),
            })
    }

    /// Pick an image for a resolved query and report the outcome
    pub fn select(
        &self,
        resolution: ResolutionResult,
        members: &[ClassMember],
        min_confidence: f64,
    ) -> DomainResult<SelectedImage> {
        match self.select_member(&resolution.label, members, min_confidence) {
            Ok(member) => {
                let eligible_count = members
                    .iter()
                    .filter(|m| m.is_eligible(min_confidence))
                    .count();
                self.event_bus.emit(ImageSelected::new(
                    resolution.class_id.clone(),
                    member.filename.clone(),
                    member.confidence,
                    eligible_count,
                ));
                Ok(SelectedImage::new(resolution, member))
            }
            Err(e) => {
                self.event_bus.emit(NoEligibleImages::new(
                    resolution.class_id.clone(),
                    resolution.label.clone(),
                    min_confidence,
                ));
                Err(e)
            }
        }
    }
}
