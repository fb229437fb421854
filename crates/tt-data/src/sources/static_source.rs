use async_trait::async_trait;
use parking_lot::Mutex;
use ahash::AHashMap;
use tt_core::Lecture;

use super::CatalogSource;
use crate::DataError;

/// In-memory endpoints; counts every fetch it serves
pub struct StaticSource {
    endpoints: AHashMap<String, Vec<Lecture>>,
    calls: Mutex<AHashMap<String, usize>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self {
            endpoints: AHashMap::new(),
            calls: Mutex::new(AHashMap::new()),
        }
    }

    /// Publish `lectures` at `endpoint`
    pub fn with_endpoint(mut self, endpoint: impl Into<String>, lectures: Vec<Lecture>) -> Self {
        self.endpoints.insert(endpoint.into(), lectures);
        self
    }

    /// How many times `endpoint` has been fetched
    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls.lock().get(endpoint).copied().unwrap_or(0)
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Lecture>, DataError> {
        *self.calls.lock().entry(endpoint.to_string()).or_insert(0) += 1;
        tokio::task::yield_now().await;
        self.endpoints
            .get(endpoint)
            .cloned()
            .ok_or_else(|| DataError::NotFound(endpoint.to_string()))
    }

    fn source_name(&self) -> &str {
        "static"
    }
}
