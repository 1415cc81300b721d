//! Statistics Invariants:
//!
//! 1. Statistics are ALWAYS derived, NEVER primary
//! 2. Statistics never alter the vocabulary or the store
//! 3. Stale statistics are acceptable

pub mod entity;
pub use entity::{BotStatistics, QueryCounters};
