// src/repositories/classification_repository.rs
//
// Read side of the classifier output: the source of truth for the
// vocabulary and for the members of every breed class. Rows are written
// through ImageRepository::save.

use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{BreedClass, ClassMember};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait ClassificationRepository: Send + Sync {
    /// Distinct classes having at least one classification at or above the floor,
    /// ordered by class identifier
    fn list_available_classes(&self, min_confidence: f64) -> AppResult<Vec<BreedClass>>;

    /// Images of one class at or above the floor
    fn list_class_members(&self, class_id: &str, min_confidence: f64)
        -> AppResult<Vec<ClassMember>>;

    /// Mean probability over every stored classification, `None` when empty
    fn average_confidence(&self) -> AppResult<Option<f64>>;
}

pub struct SqliteClassificationRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteClassificationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_class(row: &Row) -> Result<BreedClass, rusqlite::Error> {
        Ok(BreedClass {
            class_id: row.get("class_id")?,
            class_name: row.get("class_name")?,
        })
    }

    fn row_to_member(row: &Row) -> Result<ClassMember, rusqlite::Error> {
        Ok(ClassMember {
            filename: row.get("filename")?,
            confidence: row.get("probability")?,
        })
    }
}

impl ClassificationRepository for SqliteClassificationRepository {
    fn list_available_classes(&self, min_confidence: f64) -> AppResult<Vec<BreedClass>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT class_id, class_name
             FROM classifications
             WHERE probability >= ?1
             ORDER BY class_id, class_name",
        )?;

        let classes = stmt
            .query_map(params![min_confidence], Self::row_to_class)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(classes)
    }

    fn list_class_members(
        &self,
        class_id: &str,
        min_confidence: f64,
    ) -> AppResult<Vec<ClassMember>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT images.filename, classifications.probability
             FROM classifications
             INNER JOIN images ON classifications.image_id = images.image_id
             WHERE classifications.class_id = ?1
               AND classifications.probability >= ?2
             ORDER BY images.filename",
        )?;

        let members = stmt
            .query_map(params![class_id, min_confidence], Self::row_to_member)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(members)
    }

    fn average_confidence(&self) -> AppResult<Option<f64>> {
        let conn = self.pool.get()?;

        let average: Option<f64> =
            conn.query_row("SELECT AVG(probability) FROM classifications", [], |row| {
                row.get(0)
            })?;

        Ok(average)
    }
}
