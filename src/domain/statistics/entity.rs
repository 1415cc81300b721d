use serde::{Deserialize, Serialize};

/// Counters accumulated from bot events since process start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCounters {
    /// Queries that resolved to a known breed
    pub resolved: u64,

    /// Resolved queries that were an exact label match
    pub exact_matches: u64,

    /// Queries whose best match was rejected
    pub rejected: u64,

    /// Images handed back to users
    pub images_served: u64,

    /// Breeds resolved but with no image above the confidence floor
    pub no_eligible_images: u64,

    /// Vocabulary rebuilds
    pub vocabulary_refreshes: u64,
}

/// Point-in-time view combining store facts and session counters.
/// Derived data: it can always be recomputed and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotStatistics {
    pub label_count: usize,
    pub class_count: usize,
    pub image_count: u64,
    pub average_confidence: Option<f64>,
    pub counters: QueryCounters,
}
