use std::{collections::HashSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use reelshelf_model::{MediaId, SearchIndexEntry};
use tracing::debug;

use super::SearchProvider;
use crate::error::SearchError;

/// Bounds every `search` call of the wrapped provider. Index maintenance is
/// passed through untimed.
#[derive(Clone)]
pub struct TimedSearchProvider {
    inner: Arc<dyn SearchProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for TimedSearchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedSearchProvider")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl TimedSearchProvider {
    pub fn new(inner: Arc<dyn SearchProvider>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl SearchProvider for TimedSearchProvider {
    async fn search(&self, term: &str) -> Result<HashSet<MediaId>, SearchError> {
        match tokio::time::timeout(self.timeout, self.inner.search(term)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(timeout = ?self.timeout, "search provider timed out");
                Err(SearchError::Timeout(self.timeout))
            }
        }
    }

    async fn upsert(&self, entry: SearchIndexEntry) -> Result<(), SearchError> {
        self.inner.upsert(entry).await
    }

    async fn remove(&self, id: MediaId) -> Result<(), SearchError> {
        self.inner.remove(id).await
    }
}
