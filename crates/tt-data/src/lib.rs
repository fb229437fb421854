//! Catalog loading and search for the timetable boards

pub mod cache;
pub mod config;
pub mod filter;
pub mod pagination;
pub mod search;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use cache::{CachedFetch, FetchCache};
pub use config::CatalogConfig;
pub use filter::{distinct_majors, ScheduleFilterEngine, SearchOptions};
pub use pagination::{NoScroll, PaginationController, ScrollContainer, PAGE_SIZE};
pub use search::SearchSession;
pub use sources::{CatalogLoader, CatalogSource, JsonFileSource, StaticSource};

/// Errors that can occur while loading catalog data.
///
/// Cloneable so a single failed fetch can be handed to every caller that
/// joined it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON decoding error: {0}")]
    Decode(String),

    #[error("Endpoint not found: {0}")]
    NotFound(String),

    #[error("Fetch of {endpoint} failed: {reason}")]
    Fetch { endpoint: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for DataError {
    fn from(error: std::io::Error) -> Self {
        DataError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(error: serde_json::Error) -> Self {
        DataError::Decode(error.to_string())
    }
}
