use std::time::Duration;

use reelshelf_model::{MediaId, ModelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(feature = "database")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Record not found: {0}")]
    NotFound(MediaId),

    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        CatalogError::InvalidRecord(err.to_string())
    }
}

impl From<SearchError> for CatalogError {
    fn from(err: SearchError) -> Self {
        CatalogError::SearchUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failure reported by a search provider. Never interpreted as "no matches".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search is disabled")]
    Disabled,

    #[error("search backend unavailable: {0}")]
    Backend(String),

    #[error("search timed out after {0:?}")]
    Timeout(Duration),
}
