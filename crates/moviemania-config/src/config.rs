use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Store keys name files on disk: letters, digits, '-' and '_' only
pub fn is_valid_store_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) never reach the provider
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_watched_key")]
    pub watched_key: String,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_min_query_length() -> usize {
    3
}

fn default_watched_key() -> String {
    "watched".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            watched_key: default_watched_key(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or defaults when it does not exist yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.omdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("omdb.base_url cannot be empty"));
        }
        if !self.omdb.base_url.starts_with("http://") && !self.omdb.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL: {}", self.omdb.base_url));
        }
        if self.omdb.timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("omdb.timeout_secs must be greater than zero"));
        }
        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("search.min_query_length must be at least 1"));
        }
        if !is_valid_store_key(&self.storage.watched_key) {
            return Err(anyhow::anyhow!(
                "storage.watched_key must be non-empty and use only letters, digits, '-' or '_': {:?}",
                self.storage.watched_key
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            omdb: OmdbConfig {
                base_url: "http://localhost:8080/".to_string(),
                timeout_secs: Some(5),
            },
            search: SearchConfig { min_query_length: 4 },
            storage: StorageConfig::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.omdb.base_url, "http://localhost:8080/");
        assert_eq!(loaded.omdb.timeout_secs, Some(5));
        assert_eq!(loaded.search.min_query_length, 4);
        assert_eq!(loaded.storage.watched_key, "watched");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[search]\nmin_query_length = 2\n").unwrap();
        assert_eq!(config.omdb.base_url, DEFAULT_OMDB_BASE_URL);
        assert_eq!(config.omdb.timeout_secs, None);
        assert_eq!(config.search.min_query_length, 2);
        assert_eq!(config.storage.watched_key, "watched");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.search.min_query_length, 3);
    }

    #[test]
    fn test_watched_key_must_be_a_store_key() {
        let mut config = Config::default();
        config.storage.watched_key = "my list".to_string();
        assert!(config.validate().is_err());

        config.storage.watched_key = "../watched".to_string();
        assert!(config.validate().is_err());

        config.storage.watched_key = "watched_v2-backup".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_valid_store_key() {
        assert!(is_valid_store_key("watched"));
        assert!(!is_valid_store_key(""));
        assert!(!is_valid_store_key("a.b"));
        assert!(!is_valid_store_key("my list"));
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.search.min_query_length = 0;
        assert!(config.validate().is_err());

        config.search.min_query_length = 3;
        config.omdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.omdb.base_url = DEFAULT_OMDB_BASE_URL.to_string();
        config.omdb.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }
}
