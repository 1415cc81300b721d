// src/application/replies.rs
//
// Reply formatting
//
// ARCHITECTURE:
// - Maps outcomes (success or AppError) → the text posted back to chat
// - Never exposes internal implementation details to users
// - Logs infrastructure errors for debugging

use crate::domain::{BotStatistics, DomainError, SelectedImage};
use crate::error::AppError;

pub const UNKNOWN_DOG: &str = "Sorry, I don't know that dog.";
pub const EMPTY_VOCABULARY: &str = "I don't know any dogs yet. Try again later.";
pub const STORE_BUSY: &str = "The dog archive is not answering right now. Try again in a moment.";
pub const INTERNAL_ERROR: &str = "Something went wrong while looking for your dog.";
pub const HELP: &str =
    "Mention me with a dog breed (e.g. `beagle`), or `classes`, `stats`, `reload`.";

/// Reply for a successful query
pub fn selected_image(selected: &SelectedImage, image_url: &str) -> String {
    format!("My interpretation: {}\n{}", selected.label, image_url)
}

/// Reply for the `classes` command
pub fn listing(labels: &str) -> String {
    if labels.is_empty() {
        EMPTY_VOCABULARY.to_string()
    } else {
        labels.to_string()
    }
}

/// Reply for the `reload` command
pub fn reloaded(label_count: usize) -> String {
    format!("Vocabulary reloaded: {} breed names.", label_count)
}

pub fn statistics(stats: &BotStatistics) -> String {
    let average = stats
        .average_confidence
        .map(|c| format!("{:.2}", c))
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "Images: {}\nAverage confidence: {}\nBreed names: {} ({} breeds)\n\
         Queries answered: {} ({} exact)\nUnknown dogs: {}\nBreeds without pictures: {}\n\
         Vocabulary reloads: {}",
        stats.image_count,
        average,
        stats.label_count,
        stats.class_count,
        stats.counters.images_served,
        stats.counters.exact_matches,
        stats.counters.rejected,
        stats.counters.no_eligible_images,
        stats.counters.vocabulary_refreshes,
    )
}

/// Reply for a failed request
pub fn error(error: &AppError) -> String {
    match error {
        AppError::Domain(domain_error) => match domain_error {
            DomainError::MatchRejected { .. } => UNKNOWN_DOG.to_string(),
            DomainError::EmptyVocabulary => EMPTY_VOCABULARY.to_string(),
            DomainError::NoEligibleMembers { label } => {
                format!("I know the {}, but I have no good picture of one.", label)
            }
            DomainError::InvariantViolation(message) => {
                log::error!("Invariant violation: {}", message);
                INTERNAL_ERROR.to_string()
            }
        },

        AppError::StoreUnavailable(message) => {
            log::warn!("Store unavailable: {}", message);
            STORE_BUSY.to_string()
        }

        AppError::Database(_) | AppError::Pool(_) => {
            log::error!("Store error: {}", error);
            STORE_BUSY.to_string()
        }

        other => {
            log::error!("Request failed: {}", other);
            INTERNAL_ERROR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QueryCounters;

    #[test]
    fn test_selected_image_reply() {
        let selected = SelectedImage {
            label: "beagle".to_string(),
            class_id: "n02088364".to_string(),
            distance: 2,
            filename: "n02088364_10.jpg".to_string(),
            confidence: 0.9,
        };

        assert_eq!(
            selected_image(&selected, "http://dogs.test/static/v2/n02088364_10.jpg"),
            "My interpretation: beagle\nhttp://dogs.test/static/v2/n02088364_10.jpg"
        );
    }

    #[test]
    fn test_error_replies() {
        let rejected = AppError::Domain(DomainError::MatchRejected {
            query: "zzz".to_string(),
            best_guess: "pug".to_string(),
            distance: 3,
        });
        assert_eq!(error(&rejected), UNKNOWN_DOG);

        assert_eq!(
            error(&AppError::Domain(DomainError::EmptyVocabulary)),
            EMPTY_VOCABULARY
        );
        assert!(error(&AppError::Domain(DomainError::NoEligibleMembers {
            label: "pug".to_string()
        }))
        .contains("pug"));
        assert_eq!(
            error(&AppError::StoreUnavailable("timeout".to_string())),
            STORE_BUSY
        );
        assert_eq!(error(&AppError::Transport("closed".to_string())), INTERNAL_ERROR);
    }

    #[test]
    fn test_listing_reply() {
        assert_eq!(listing(""), EMPTY_VOCABULARY);
        assert_eq!(listing("beagle\npug"), "beagle\npug");
    }

    #[test]
    fn test_statistics_reply() {
        let stats = BotStatistics {
            label_count: 3,
            class_count: 2,
            image_count: 120,
            average_confidence: Some(0.8123),
            counters: QueryCounters {
                resolved: 5,
                exact_matches: 4,
                rejected: 1,
                images_served: 5,
                no_eligible_images: 0,
                vocabulary_refreshes: 2,
            },
        };

        let text = statistics(&stats);

        assert!(text.contains("Images: 120"));
        assert!(text.contains("Average confidence: 0.81"));
        assert!(text.contains("Breed names: 3 (2 breeds)"));
        assert!(text.contains("Queries answered: 5 (4 exact)"));
    }
}
