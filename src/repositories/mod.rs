// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod classification_repository;
pub mod image_repository;

pub use classification_repository::{ClassificationRepository, SqliteClassificationRepository};
pub use image_repository::{ImageRepository, SqliteImageRepository};

#[cfg(test)]
pub use classification_repository::MockClassificationRepository;
#[cfg(test)]
pub use image_repository::MockImageRepository;
