#![forbid(unsafe_code)]

use super::StoreError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_DB_FILE_NAME: &str = "novel.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    pub db_file_name: String,
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("."),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: storage_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.db_file_name.trim().is_empty() {
            return Err(StoreError::InvalidInput("db_file_name must not be empty"));
        }
        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(&self.db_file_name)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = StoreConfig::from_json_str(r#"{"storage_dir": "/tmp/novel"}"#)
            .expect("parse config");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/novel"));
        assert_eq!(config.db_file_name, "novel.db");
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/novel/novel.db"));
    }

    #[test]
    fn blank_file_name_is_rejected() {
        let err = StoreConfig::from_json_str(r#"{"db_file_name": "  "}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = StoreConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
