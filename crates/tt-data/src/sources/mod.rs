//! Catalog sources and the cached loader on top of them

use async_trait::async_trait;
use tt_core::Lecture;

use crate::DataError;

pub mod json_source;
pub mod loader;
pub mod static_source;

pub use json_source::JsonFileSource;
pub use loader::CatalogLoader;
pub use static_source::StaticSource;

/// Something that can return the lectures behind an endpoint.
///
/// Transport is up to the implementation; the loader only sees records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every lecture published at `endpoint`
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Lecture>, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
