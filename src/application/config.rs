// src/application/config.rs
//
// Bot configuration
//
// Loaded once at startup from a JSON file. Every field except
// `static_base_url` has a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::db::{get_database_path, DEFAULT_POOL_SIZE};
use crate::error::{AppError, AppResult};
use crate::services::DEFAULT_ACCEPTANCE_THRESHOLD;

fn default_image_path_prefix() -> String {
    "v2/".to_string()
}

fn default_acceptance_threshold() -> usize {
    DEFAULT_ACCEPTANCE_THRESHOLD
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Bot token for Slack RTM; without it only the console transport is available
    #[serde(default)]
    pub slack_token: Option<String>,

    /// SQLite file; defaults to `{data_dir}/dogbot/dogbot.db`
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Base URL of the static server hosting the images, e.g. `http://host:8080/static/`
    pub static_base_url: String,

    /// Path between the base URL and the image filename
    #[serde(default = "default_image_path_prefix")]
    pub image_path_prefix: String,

    /// Classifications below this probability are invisible to the bot
    #[serde(default)]
    pub minimum_class_confidence: f64,

    /// Fuzzy matches are accepted iff their distance is strictly below this value
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: usize,

    /// Deadline for each store call
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Periodic vocabulary rebuild; disabled when absent
    #[serde(default)]
    pub vocabulary_refresh_secs: Option<u64>,

    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Configuration {
    /// Read and validate a configuration file
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let config: Configuration = serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.static_base_url.trim().is_empty() {
            return Err(AppError::Config("static_base_url must not be empty".to_string()));
        }
        if !self.minimum_class_confidence.is_finite()
            || !(0.0..=1.0).contains(&self.minimum_class_confidence)
        {
            return Err(AppError::Config(format!(
                "minimum_class_confidence must be within [0, 1], got {}",
                self.minimum_class_confidence
            )));
        }
        if self.acceptance_threshold == 0 {
            return Err(AppError::Config(
                "acceptance_threshold must be positive (0 rejects every query)".to_string(),
            ));
        }
        if self.store_timeout_ms == 0 {
            return Err(AppError::Config("store_timeout_ms must be positive".to_string()));
        }
        if self.pool_size == 0 {
            return Err(AppError::Config("pool_size must be positive".to_string()));
        }
        if self.vocabulary_refresh_secs == Some(0) {
            return Err(AppError::Config(
                "vocabulary_refresh_secs must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured database file, or the per-user default
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.vocabulary_refresh_secs.map(Duration::from_secs)
    }

    /// Public URL of an image file
    pub fn image_url(&self, filename: &str) -> String {
        format!(
            "{}{}{}",
            self.static_base_url, self.image_path_prefix, filename
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = Configuration::from_json(r#"{"static_base_url": "http://dogs.test/static/"}"#)
            .unwrap();

        assert_eq!(config.slack_token, None);
        assert_eq!(config.database_path, None);
        assert_eq!(config.image_path_prefix, "v2/");
        assert_eq!(config.minimum_class_confidence, 0.0);
        assert_eq!(config.acceptance_threshold, 10);
        assert_eq!(config.store_timeout(), Duration::from_secs(5));
        assert_eq!(config.refresh_interval(), None);
        assert_eq!(config.pool_size, 15);
    }

    #[test]
    fn test_full_config() {
        let raw = r#"{
            "slack_token": "xoxb-test",
            "database_path": "/tmp/dogs.db",
            "static_base_url": "http://dogs.test/static/",
            "image_path_prefix": "v3/",
            "minimum_class_confidence": 0.6,
            "acceptance_threshold": 4,
            "store_timeout_ms": 250,
            "vocabulary_refresh_secs": 600,
            "pool_size": 4
        }"#;

        let config = Configuration::from_json(raw).unwrap();

        assert_eq!(config.slack_token.as_deref(), Some("xoxb-test"));
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/dogs.db")
        );
        assert_eq!(config.acceptance_threshold, 4);
        assert_eq!(config.store_timeout(), Duration::from_millis(250));
        assert_eq!(config.refresh_interval(), Some(Duration::from_secs(600)));
        assert_eq!(
            config.image_url("n02088364_1.jpg"),
            "http://dogs.test/static/v3/n02088364_1.jpg"
        );
    }

    #[test]
    fn test_missing_base_url_is_rejected() {
        assert!(matches!(
            Configuration::from_json(r#"{"slack_token": "x"}"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Configuration::from_json(r#"{"static_base_url": "  "}"#),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            r#"{"static_base_url": "u", "minimum_class_confidence": 1.5}"#,
            r#"{"static_base_url": "u", "minimum_class_confidence": -0.1}"#,
            r#"{"static_base_url": "u", "acceptance_threshold": 0}"#,
            r#"{"static_base_url": "u", "store_timeout_ms": 0}"#,
            r#"{"static_base_url": "u", "pool_size": 0}"#,
            r#"{"static_base_url": "u", "vocabulary_refresh_secs": 0}"#,
        ];

        for raw in cases {
            assert!(
                matches!(Configuration::from_json(raw), Err(AppError::Config(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"static_base_url": "http://dogs.test/"}}"#).unwrap();

        let config = Configuration::load(file.path()).unwrap();
        assert_eq!(config.image_url("a.jpg"), "http://dogs.test/v2/a.jpg");

        let missing = Configuration::load(Path::new("/nonexistent/dogbot.json"));
        assert!(matches!(missing, Err(AppError::Config(_))));
    }
}
