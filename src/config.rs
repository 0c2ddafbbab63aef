// src/config.rs
//
// Application configuration.
//
// Layering (later wins):
// 1. Built-in defaults
// 2. `moviehub.toml` in the working directory (optional)
// 3. An explicit file passed on the command line (optional)
// 4. Environment variables prefixed `MOVIEHUB_`, sections split by `__`
//    (e.g. `MOVIEHUB_CATALOG__API_KEY`)

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::repositories::DEFAULT_FAVORITES_KEY;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub poster_base_url: String,

    /// Sent as the `api_key` query parameter
    pub api_key: Option<String>,

    /// Sent as `Authorization: Bearer ...`; preferred over `api_key`
    pub bearer_token: Option<String>,

    pub language: String,
    pub timeout_secs: u64,

    /// Upper bound on in-flight fetches during hydration
    pub max_concurrency: usize,

    /// Extra attempts after a transport failure. 0 disables retries.
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `{APP_DATA}/moviehub/moviehub.db`
    pub database_path: Option<PathBuf>,
    pub favorites_key: String,
}

/// How requests to the catalog are authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAuth {
    Bearer(String),
    ApiKey(String),
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            poster_base_url: DEFAULT_POSTER_BASE_URL.to_string(),
            api_key: None,
            bearer_token: None,
            language: "en-US".to_string(),
            timeout_secs: 30,
            max_concurrency: 8,
            max_retries: 0,
            retry_backoff_ms: 250,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn auth(&self) -> Option<CatalogAuth> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        non_blank(&self.bearer_token)
            .map(CatalogAuth::Bearer)
            .or_else(|| non_blank(&self.api_key).map(CatalogAuth::ApiKey))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl StorageConfig {
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => crate::db::default_database_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all layers and validate it
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut builder =
            Config::builder().add_source(File::with_name("moviehub").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("MOVIEHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Credentials are not checked here: commands that never reach the
    /// catalog work without them, and the client reports their absence.
    pub fn validate(&self) -> AppResult<()> {
        let catalog = &self.catalog;

        if !catalog.base_url.starts_with("http://") && !catalog.base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "catalog.base_url must be an http(s) URL, got '{}'",
                catalog.base_url
            )));
        }

        if catalog.timeout_secs == 0 {
            return Err(AppError::Config(
                "catalog.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if catalog.max_concurrency == 0 {
            return Err(AppError::Config(
                "catalog.max_concurrency must be greater than zero".to_string(),
            ));
        }

        if self.storage.favorites_key.trim().is_empty() {
            return Err(AppError::Config(
                "storage.favorites_key cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.catalog.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.base_url, DEFAULT_CATALOG_BASE_URL);
        assert_eq!(config.catalog.max_retries, 0);
        assert_eq!(config.storage.favorites_key, "@FavoriteList");
    }

    #[test]
    fn test_missing_credentials_pass_validation() {
        let config = AppConfig::default();
        assert!(config.catalog.auth().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_base_url_fails_validation() {
        let mut config = valid_config();
        config.catalog.base_url = "ftp://catalog".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_bearer_token_preferred_over_api_key() {
        let mut config = valid_config();
        config.catalog.bearer_token = Some("token".to_string());

        assert_eq!(
            config.catalog.auth(),
            Some(CatalogAuth::Bearer("token".to_string()))
        );
    }

    #[test]
    fn test_blank_credentials_are_ignored() {
        let mut config = AppConfig::default();
        config.catalog.bearer_token = Some("   ".to_string());
        config.catalog.api_key = Some("key".to_string());

        assert_eq!(
            config.catalog.auth(),
            Some(CatalogAuth::ApiKey("key".to_string()))
        );
    }

    #[test]
    fn test_zero_concurrency_fails_validation() {
        let mut config = valid_config();
        config.catalog.max_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[catalog]\napi_key = \"from-file\"\nmax_retries = 2\n\n[storage]\nfavorites_key = \"@Favs\""
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.catalog.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.catalog.max_retries, 2);
        assert_eq!(config.catalog.language, "en-US");
        assert_eq!(config.storage.favorites_key, "@Favs");
    }
}
