use std::collections::HashSet;

use async_trait::async_trait;
use reelshelf_model::{MediaId, SearchIndexEntry};

use super::SearchProvider;
use crate::error::SearchError;

/// Provider used when search is switched off. Queries with a search term
/// fail with [`SearchError::Disabled`]; index maintenance is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSearchProvider;

#[async_trait]
impl SearchProvider for NullSearchProvider {
    async fn search(&self, _term: &str) -> Result<HashSet<MediaId>, SearchError> {
        Err(SearchError::Disabled)
    }

    async fn upsert(&self, _entry: SearchIndexEntry) -> Result<(), SearchError> {
        Ok(())
    }

    async fn remove(&self, _id: MediaId) -> Result<(), SearchError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_reports_disabled() {
        let provider = NullSearchProvider;
        assert_eq!(provider.search("Matrix").await, Err(SearchError::Disabled));
        assert!(provider.remove(MediaId(1)).await.is_ok());
    }
}
