use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub datadir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(alias = "baseUrl", rename = "baseurl")]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Storage location: explicit sqlite filename first, then `datadir`,
    /// then the working directory.
    pub fn get_storage_path(&self) -> String {
        if let Some(ref sqlite) = self.storage.sqlite {
            return sqlite.filename.clone();
        }

        let dir = self.datadir.as_deref().unwrap_or(".");
        PathBuf::from(dir)
            .join("searchflix.db")
            .to_string_lossy()
            .to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.get_storage_path(), "./searchflix.db");
    }

    #[test]
    fn test_parse_full_document() {
        let yaml = r#"
api:
  baseurl: "https://movies.example.com"
  timeout: 5
storage:
  sqlite:
    filename: "/var/lib/searchflix/cache.db"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "https://movies.example.com");
        assert_eq!(config.api.timeout, 5);
        assert_eq!(config.get_storage_path(), "/var/lib/searchflix/cache.db");
    }

    #[test]
    fn test_page_size_is_fixed() {
        // Older config files may still carry a page size; it has no effect.
        let config: Config = serde_yaml::from_str("search:\n  pagesize: 0\n").unwrap();
        assert_eq!(config.api.timeout, 30);
        let params = crate::search::SearchCriteria::default().request_params();
        assert_eq!(params.last(), Some(&("size", "5".to_string())));
    }

    #[test]
    fn test_datadir_storage_path() {
        let config: Config = serde_yaml::from_str("datadir: /tmp/sf").unwrap();
        assert_eq!(config.get_storage_path(), "/tmp/sf/searchflix.db");
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/searchflix.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_, _)));
    }
}
