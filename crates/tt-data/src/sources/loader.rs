use std::sync::Arc;
use futures::future::try_join_all;
use tt_core::Lecture;

use super::CatalogSource;
use crate::cache::{CachedFetch, FetchCache};
use crate::config::CatalogConfig;
use crate::DataError;

/// Lectures behind one endpoint, shared between callers
pub type LectureList = Vec<Arc<Lecture>>;

/// Loads the two catalog endpoints through a shared fetch cache
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    cache: FetchCache<LectureList>,
    config: CatalogConfig,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>, config: CatalogConfig) -> Self {
        Self {
            source,
            cache: FetchCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Cached fetch of a single endpoint
    pub fn fetch_endpoint(&self, endpoint: &str) -> CachedFetch<LectureList> {
        let source = Arc::clone(&self.source);
        let name = endpoint.to_string();
        self.cache.get_or_fetch(
            endpoint,
            move || async move {
                let lectures = source.fetch(&name).await?;
                Ok::<_, DataError>(lectures.into_iter().map(Arc::new).collect())
            },
            self.config.cache_ttl(),
        )
    }

    pub async fn load_majors(&self) -> Result<Arc<LectureList>, DataError> {
        self.fetch_endpoint(&self.config.majors_endpoint).await
    }

    pub async fn load_liberal_arts(&self) -> Result<Arc<LectureList>, DataError> {
        self.fetch_endpoint(&self.config.liberal_arts_endpoint).await
    }

    /// Load the whole catalog: majors followed by general-education lectures.
    ///
    /// Every endpoint is requested `requests_per_endpoint` times at once, the
    /// way the search dialog's mount does; the cache collapses them to one
    /// fetch each. Each endpoint's lectures appear once in the result.
    pub async fn load_all(&self) -> Result<LectureList, DataError> {
        let repeats = self.config.requests_per_endpoint.max(1);
        let endpoints = self.config.endpoints();

        let requests = endpoints
            .iter()
            .flat_map(|endpoint| std::iter::repeat(*endpoint).take(repeats))
            .map(|endpoint| self.fetch_endpoint(endpoint));

        let results = try_join_all(requests).await?;

        let lectures: LectureList = results
            .iter()
            .step_by(repeats)
            .flat_map(|list| list.iter().cloned())
            .collect();

        tracing::info!(
            "Loaded {} lectures from {}",
            lectures.len(),
            self.source.source_name()
        );
        Ok(lectures)
    }

    /// Forget cached endpoints so the next load refetches
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticSource;

    fn lecture(id: &str) -> Lecture {
        Lecture {
            id: id.to_string(),
            grade: 1,
            title: format!("Lecture {}", id),
            credits: "3".to_string(),
            major: "major".to_string(),
            schedule: "월1".to_string(),
        }
    }

    fn loader() -> (Arc<StaticSource>, CatalogLoader) {
        let config = CatalogConfig::default();
        let source = Arc::new(
            StaticSource::new()
                .with_endpoint(config.majors_endpoint.clone(), vec![lecture("M1"), lecture("M2")])
                .with_endpoint(config.liberal_arts_endpoint.clone(), vec![lecture("G1")]),
        );
        let loader = CatalogLoader::new(source.clone(), config);
        (source, loader)
    }

    #[tokio::test]
    async fn test_load_all_fetches_each_endpoint_once() {
        let (source, loader) = loader();

        let lectures = loader.load_all().await.unwrap();
        let ids: Vec<&str> = lectures.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["M1", "M2", "G1"]);

        let config = loader.config();
        assert_eq!(source.call_count(&config.majors_endpoint), 1);
        assert_eq!(source.call_count(&config.liberal_arts_endpoint), 1);

        // Served from cache afterwards
        loader.load_majors().await.unwrap();
        assert_eq!(source.call_count(&config.majors_endpoint), 1);
    }

    #[tokio::test]
    async fn test_lectures_are_shared_between_loads() {
        let (_, loader) = loader();
        let first = loader.load_majors().await.unwrap();
        let second = loader.load_majors().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_missing_endpoint_fails_and_retries() {
        let config = CatalogConfig::default();
        let source = Arc::new(
            StaticSource::new().with_endpoint(config.liberal_arts_endpoint.clone(), vec![lecture("G1")]),
        );
        let loader = CatalogLoader::new(source.clone(), config);

        assert!(matches!(loader.load_all().await, Err(DataError::NotFound(_))));
        assert!(loader.load_majors().await.is_err());
        assert_eq!(source.call_count("schedules-majors.json"), 2);
    }
}
