use std::path::PathBuf;
use async_trait::async_trait;
use tt_core::Lecture;

use super::CatalogSource;
use crate::DataError;

/// Reads endpoints as JSON array files under a root directory
pub struct JsonFileSource {
    root: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        Self { root, name }
    }

    fn path_for(&self, endpoint: &str) -> PathBuf {
        self.root.join(endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Lecture>, DataError> {
        let path = self.path_for(endpoint);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::NotFound(endpoint.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let lectures: Vec<Lecture> = serde_json::from_slice(&bytes)?;
        tracing::info!("Read {} lectures from {:?}", lectures.len(), path);
        Ok(lectures)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
