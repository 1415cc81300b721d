// src/repositories/image_repository.rs
//
// Image persistence. An image is written together with its classifier
// output so the two tables never disagree.

use rusqlite::{params, OptionalExtension};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{Classification, Image};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait ImageRepository: Send + Sync {
    /// Upsert an image and its classifications in one transaction
    fn save(&self, image: &Image, classifications: &[Classification]) -> AppResult<()>;

    fn find_by_filename(&self, filename: &str) -> AppResult<Option<Image>>;

    fn count(&self) -> AppResult<u64>;
}

pub struct SqliteImageRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteImageRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl ImageRepository for SqliteImageRepository {
    fn save(&self, image: &Image, classifications: &[Classification]) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO images (image_id, filename) VALUES (?1, ?2)
             ON CONFLICT(image_id) DO UPDATE SET filename = excluded.filename",
            params![image.image_id, image.filename],
        )?;

        for classification in classifications {
            tx.execute(
                "INSERT INTO classifications (image_id, class_id, class_name, probability)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(image_id, class_id) DO UPDATE SET
                     class_name = excluded.class_name,
                     probability = excluded.probability",
                params![
                    classification.image_id,
                    classification.class_id,
                    classification.class_name,
                    classification.probability,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn find_by_filename(&self, filename: &str) -> AppResult<Option<Image>> {
        let conn = self.pool.get()?;

        let image = conn
            .query_row(
                "SELECT image_id, filename FROM images WHERE filename = ?1",
                params![filename],
                |row| {
                    Ok(Image {
                        image_id: row.get(0)?,
                        filename: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(image)
    }

    fn count(&self) -> AppResult<u64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};

    fn setup() -> (Arc<ConnectionPool>, SqliteImageRepository) {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        (Arc::clone(&pool), SqliteImageRepository::new(pool))
    }

    fn label(image_id: &str, class_id: &str, probability: f64) -> Classification {
        Classification {
            image_id: image_id.to_string(),
            class_id: class_id.to_string(),
            class_name: "Pug".to_string(),
            probability,
        }
    }

    fn classification_count(pool: &ConnectionPool) -> i64 {
        pool.get()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM classifications", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_save_and_count() {
        let (pool, repo) = setup();

        assert_eq!(repo.count().unwrap(), 0);

        repo.save(&Image::new("i1", "pug_1.jpg"), &[label("i1", "n1", 0.9)])
            .unwrap();
        repo.save(&Image::new("i2", "pug_2.jpg"), &[]).unwrap();
        // Saving the same id again updates the row
        repo.save(&Image::new("i2", "pug_2b.jpg"), &[label("i2", "n1", 0.4)])
            .unwrap();

        assert_eq!(repo.count().unwrap(), 2);
        assert_eq!(classification_count(&pool), 2);
    }

    #[test]
    fn test_find_by_filename() {
        let (_pool, repo) = setup();
        repo.save(&Image::new("i1", "pug_1.jpg"), &[]).unwrap();

        assert_eq!(
            repo.find_by_filename("pug_1.jpg").unwrap(),
            Some(Image::new("i1", "pug_1.jpg"))
        );
        assert_eq!(repo.find_by_filename("pug_9.jpg").unwrap(), None);
    }

    #[test]
    fn test_failed_save_writes_nothing() {
        let (pool, repo) = setup();

        // second row violates the probability CHECK constraint
        let result = repo.save(
            &Image::new("i1", "pug_1.jpg"),
            &[label("i1", "n1", 0.9), label("i1", "n2", 3.0)],
        );

        assert!(result.is_err());
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(classification_count(&pool), 0);
    }
}
