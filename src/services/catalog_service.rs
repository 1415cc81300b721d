// src/services/catalog_service.rs
//
// Catalog Service
//
// Write side of the store: records classifier output (an image and the
// classes it was labelled with).
//
// CRITICAL RULES:
// - Every row is validated before anything is written
// - An invalid record writes nothing
// - A filename belongs to exactly one image id
// - An image and its classifications are written in one transaction
// - Re-importing the same image updates it in place

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{validate_classification, Classification, DomainError, Image};
use crate::error::{AppError, AppResult};
use crate::repositories::ImageRepository;

/// One classified image as produced by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub image_id: String,
    pub filename: String,
    pub classifications: Vec<ClassLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassLabel {
    pub class_id: String,
    pub class_name: String,
    pub probability: f64,
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub images: usize,
    pub classifications: usize,
    pub skipped: usize,
}

pub struct CatalogService {
    image_repo: Arc<dyn ImageRepository>,
}

impl CatalogService {
    pub fn new(image_repo: Arc<dyn ImageRepository>) -> Self {
        Self { image_repo }
    }

    /// Validate and store one image with its classifications
    pub fn record(&self, record: &ImageRecord) -> AppResult<usize> {
        if record.image_id.trim().is_empty() || record.filename.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Image id and filename cannot be empty".to_string(),
            )
            .into());
        }

        let classifications: Vec<Classification> = record
            .classifications
            .iter()
            .map(|label| Classification {
                image_id: record.image_id.clone(),
                class_id: label.class_id.clone(),
                class_name: label.class_name.clone(),
                probability: label.probability,
            })
            .collect();

        for classification in &classifications {
            validate_classification(classification)?;
        }

        if let Some(owner) = self.image_repo.find_by_filename(&record.filename)? {
            if owner.image_id != record.image_id {
                return Err(DomainError::InvariantViolation(format!(
                    "Filename {} already belongs to image {}",
                    record.filename, owner.image_id
                ))
                .into());
            }
        }

        let image = Image::new(record.image_id.as_str(), record.filename.as_str());
        self.image_repo.save(&image, &classifications)?;

        Ok(classifications.len())
    }

    /// Store every valid record; invalid ones are logged and skipped
    pub fn import(&self, records: &[ImageRecord]) -> AppResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for record in records {
            match self.record(record) {
                Ok(count) => {
                    summary.images += 1;
                    summary.classifications += count;
                }
                Err(AppError::Domain(e)) => {
                    log::warn!("Skipping image {}: {}", record.image_id, e);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Imported {} images ({} classifications), skipped {}",
            summary.images,
            summary.classifications,
            summary.skipped
        );
        Ok(summary)
    }

    /// Import a JSON array of records from a file
    pub fn import_file(&self, path: &Path) -> AppResult<ImportSummary> {
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<ImageRecord> = serde_json::from_str(&raw)?;
        self.import(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::repositories::{MockImageRepository, SqliteImageRepository};
    use std::io::Write;

    fn record(image_id: &str, labels: &[(&str, &str, f64)]) -> ImageRecord {
        ImageRecord {
            image_id: image_id.to_string(),
            filename: format!("{}.jpg", image_id),
            classifications: labels
                .iter()
                .map(|(id, name, p)| ClassLabel {
                    class_id: id.to_string(),
                    class_name: name.to_string(),
                    probability: *p,
                })
                .collect(),
        }
    }

    fn with_filename(mut record: ImageRecord, filename: &str) -> ImageRecord {
        record.filename = filename.to_string();
        record
    }

    #[test]
    fn test_record_saves_image_with_classifications() {
        let mut images = MockImageRepository::new();
        images.expect_find_by_filename().returning(|_| Ok(None));
        images
            .expect_save()
            .withf(|image, classifications| {
                image.image_id == "i1"
                    && image.filename == "i1.jpg"
                    && classifications.len() == 2
                    && classifications.iter().all(|c| c.image_id == "i1")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = CatalogService::new(Arc::new(images));
        let saved = service
            .record(&record("i1", &[("n1", "Pug", 0.9), ("n2", "Beagle", 0.1)]))
            .unwrap();

        assert_eq!(saved, 2);
    }

    #[test]
    fn test_invalid_record_writes_nothing() {
        let mut images = MockImageRepository::new();
        images.expect_find_by_filename().never();
        images.expect_save().never();

        let service = CatalogService::new(Arc::new(images));
        let err = service
            .record(&record("i1", &[("n1", "Pug", 0.9), ("n2", "Beagle", 1.7)]))
            .unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn test_reimport_of_same_image_is_allowed() {
        let mut images = MockImageRepository::new();
        images
            .expect_find_by_filename()
            .returning(|filename| Ok(Some(Image::new("i1", filename))));
        images.expect_save().times(1).returning(|_, _| Ok(()));

        let service = CatalogService::new(Arc::new(images));

        assert_eq!(service.record(&record("i1", &[("n1", "Pug", 0.9)])).unwrap(), 1);
    }

    #[test]
    fn test_import_skips_invalid_records() {
        let mut images = MockImageRepository::new();
        images.expect_find_by_filename().returning(|_| Ok(None));
        images.expect_save().times(2).returning(|_, _| Ok(()));

        let service = CatalogService::new(Arc::new(images));
        let summary = service
            .import(&[
                record("i1", &[("n1", "Pug", 0.9)]),
                record("i2", &[("", "Nameless", 0.9)]),
                record("i3", &[("n2", "Beagle", 0.6)]),
            ])
            .unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                images: 2,
                classifications: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_import_stops_on_store_failure() {
        let mut images = MockImageRepository::new();
        images.expect_find_by_filename().returning(|_| Ok(None));
        images
            .expect_save()
            .returning(|_, _| Err(AppError::Pool("exhausted".to_string())));

        let service = CatalogService::new(Arc::new(images));
        let result = service.import(&[record("i1", &[("n1", "Pug", 0.9)])]);

        assert!(matches!(result, Err(AppError::Pool(_))));
    }

    #[test]
    fn test_duplicate_filename_is_skipped_and_import_continues() {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        let images = Arc::new(SqliteImageRepository::new(pool));
        let service = CatalogService::new(images.clone());

        let summary = service
            .import(&[
                with_filename(record("i1", &[("n1", "Pug", 0.9)]), "a.jpg"),
                with_filename(record("i2", &[("n1", "Pug", 0.8)]), "a.jpg"),
                with_filename(record("i3", &[("n2", "Beagle", 0.7)]), "b.jpg"),
            ])
            .unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                images: 2,
                classifications: 2,
                skipped: 1
            }
        );
        assert_eq!(images.count().unwrap(), 2);
        assert_eq!(
            images.find_by_filename("a.jpg").unwrap(),
            Some(Image::new("i1", "a.jpg"))
        );
        assert!(images.find_by_filename("b.jpg").unwrap().is_some());
    }

    #[test]
    fn test_import_file() {
        let mut images = MockImageRepository::new();
        images.expect_find_by_filename().returning(|_| Ok(None));
        images.expect_save().times(1).returning(|_, _| Ok(()));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"image_id": "i1", "filename": "pug_1.jpg",
                 "classifications": [{{"class_id": "n1", "class_name": "Pug", "probability": 0.9}}]}}]"#
        )
        .unwrap();

        let service = CatalogService::new(Arc::new(images));
        let summary = service.import_file(file.path()).unwrap();

        assert_eq!(summary.images, 1);
    }
}
