//! Search service configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thucduong_cache::CacheTtlConfig;
use thucduong_data::TimeoutConfig;
use thucduong_observability::{LoggingConfig, LoggingError};

use crate::error::CatalogError;
use crate::search::DEFAULT_PAGE_SIZE;

/// Configuration file for the search service.
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Items per page when a request gives no limit.
    pub default_page_size: i64,

    /// Cache lifetimes, in seconds.
    pub cache: CacheTtlConfig,

    /// Store call timeouts, in milliseconds.
    pub timeouts: TimeoutConfig,

    pub logging: LoggingConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            cache: CacheTtlConfig::default(),
            timeouts: TimeoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Load and validate config from a file; `.json` files are read as JSON,
    /// everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate TOML config text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a non-positive page size and zero TTLs or timeouts.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.default_page_size < 1 {
            return Err(CatalogError::validation(format!(
                "default_page_size must be at least 1, got {}",
                self.default_page_size
            )));
        }
        self.cache
            .validate()
            .map_err(|e| CatalogError::validation(e.to_string()))?;
        if let Some(tag) = self.timeouts.first_zero() {
            return Err(CatalogError::validation(format!(
                "timeout for {} must be positive",
                tag
            )));
        }
        Ok(())
    }

    /// Install the global log subscriber described by `logging`.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        thucduong_observability::init(&self.logging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use thucduong_cache::TtlClass;
    use thucduong_data::DependencyTag;
    use thucduong_observability::LogFormat;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.cache.ttl(TtlClass::Search), Duration::from_secs(600));
        assert_eq!(
            config.timeouts.for_tag(DependencyTag::Catalog),
            Duration::from_secs(3)
        );
    }

    #[test]
    fn test_partial_sections() {
        let config = SearchConfig::from_toml_str(
            r#"
            default_page_size = 12

            [cache]
            search = 60

            [timeouts]
            reviews = 500

            [logging]
            format = "human"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_page_size, 12);
        assert_eq!(config.cache.ttl(TtlClass::Search), Duration::from_secs(60));
        assert_eq!(config.cache.ttl(TtlClass::ProductList), Duration::from_secs(900));
        assert_eq!(
            config.timeouts.for_tag(DependencyTag::Reviews),
            Duration::from_millis(500)
        );
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SearchConfig::from_toml_str("default_page_size = 0").is_err());
        assert!(SearchConfig::from_toml_str("[cache]\nproduct_list = 0").is_err());
        assert!(SearchConfig::from_toml_str("[timeouts]\ncatalog = 0").is_err());
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let dir = std::env::temp_dir().join(format!("thucduong-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("search.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        file.write_all(br#"{"default_page_size": 30, "cache": {"search": 120}}"#)
            .unwrap();
        let config = SearchConfig::load(&json_path).unwrap();
        assert_eq!(config.default_page_size, 30);
        assert_eq!(config.cache.search, 120);

        let toml_path = dir.join("search.toml");
        std::fs::write(&toml_path, "default_page_size = 5\n").unwrap();
        assert_eq!(SearchConfig::load(&toml_path).unwrap().default_page_size, 5);

        let err = SearchConfig::load(dir.join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
