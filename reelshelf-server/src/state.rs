use std::{fmt, sync::Arc, time::Duration};

use reelshelf_core::{
    application::CatalogWriter,
    database::CatalogStore,
    query::{CatalogQueryEngine, QueryPolicy},
    search::{SearchProvider, TimedSearchProvider},
};

/// Shared handles for every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub engine: CatalogQueryEngine,
    pub writer: CatalogWriter,
    pub policy: QueryPolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        search: Arc<dyn SearchProvider>,
        policy: QueryPolicy,
        search_timeout: Duration,
    ) -> Self {
        // The timeout covers provider searches only, not store reads.
        let timed = TimedSearchProvider::new(Arc::clone(&search), search_timeout);
        let engine = CatalogQueryEngine::new(Arc::clone(&store), Arc::new(timed))
            .with_page_bounds(policy.page_bounds);
        let writer = CatalogWriter::new(store, search);

        Self {
            engine,
            writer,
            policy,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
