//! Catalog configuration

use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Where the catalog lives and how long fetched data stays fresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory the endpoints are resolved against
    pub root: PathBuf,

    /// Endpoint holding major lectures
    pub majors_endpoint: String,

    /// Endpoint holding general-education lectures
    pub liberal_arts_endpoint: String,

    /// Seconds a fetched endpoint is served from cache
    pub cache_ttl_secs: u64,

    /// Concurrent requests issued per endpoint by a full load
    pub requests_per_endpoint: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            majors_endpoint: "schedules-majors.json".to_string(),
            liberal_arts_endpoint: "schedules-liberal-arts.json".to_string(),
            cache_ttl_secs: 5 * 60,
            requests_per_endpoint: 3,
        }
    }
}

impl CatalogConfig {
    /// Defaults rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Both endpoints, majors first
    pub fn endpoints(&self) -> [&str; 2] {
        [&self.majors_endpoint, &self.liberal_arts_endpoint]
    }

    /// Parse a JSON configuration; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, or fall back to defaults when it does not exist
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No catalog config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self) -> Result<(), DataError> {
        if self.majors_endpoint.is_empty() || self.liberal_arts_endpoint.is_empty() {
            return Err(DataError::Config("endpoints must not be empty".to_string()));
        }
        if self.majors_endpoint == self.liberal_arts_endpoint {
            return Err(DataError::Config("endpoints must differ".to_string()));
        }
        if self.requests_per_endpoint == 0 {
            return Err(DataError::Config("requests_per_endpoint must be at least 1".to_string()));
        }
        Ok(())
    }
}
