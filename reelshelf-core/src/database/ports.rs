use std::collections::HashSet;

use async_trait::async_trait;
use reelshelf_model::{MediaId, MediaRecord, NewMediaRecord};

use crate::error::Result;
use crate::query::filtering::FilterPipeline;

/// What a store must return for one catalog query: every record accepted by
/// `pipeline` and, when `ids` is set, whose id is in that set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreQuery {
    pub pipeline: FilterPipeline,
    pub ids: Option<HashSet<MediaId>>,
}

impl StoreQuery {
    pub fn new(pipeline: FilterPipeline) -> Self {
        Self { pipeline, ids: None }
    }

    pub fn restrict_to(mut self, ids: HashSet<MediaId>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn matches(&self, record: &MediaRecord) -> bool {
        self.ids.as_ref().is_none_or(|ids| ids.contains(&record.id))
            && self.pipeline.accepts(record)
    }
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Records satisfying `query`, in no particular order.
    async fn find_films(&self, query: &StoreQuery) -> Result<Vec<MediaRecord>>;

    /// Every live film.
    async fn all_films(&self) -> Result<Vec<MediaRecord>> {
        self.find_films(&StoreQuery::default()).await
    }

    async fn get(&self, id: MediaId) -> Result<Option<MediaRecord>>;

    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord>;

    /// Overwrite an existing record. Fails with `NotFound` for unknown ids.
    async fn update(&self, record: MediaRecord) -> Result<MediaRecord>;

    /// Mark a record deleted. Deleting twice keeps the first timestamp.
    async fn soft_delete(&self, id: MediaId) -> Result<MediaRecord>;

    /// Recompute any persisted title sort keys that disagree with the
    /// current normalization. Returns the number of rows changed.
    async fn refresh_orderable_titles(&self) -> Result<usize>;
}
