use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use reelshelf_model::{MediaId, MediaRecord, NewMediaRecord};
use tokio::sync::RwLock;
use tracing::instrument;

use super::ports::{CatalogStore, StoreQuery};
use crate::error::{CatalogError, Result};

/// Store keeping every record in process memory.
///
/// Sort keys are derived on every construction of a [`MediaRecord`], so they
/// can never be stale here.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    records: RwLock<BTreeMap<MediaId, MediaRecord>>,
    last_id: AtomicI64,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records. New ids continue after the
    /// largest seeded id.
    pub fn with_records(records: impl IntoIterator<Item = MediaRecord>) -> Self {
        let records: BTreeMap<MediaId, MediaRecord> =
            records.into_iter().map(|record| (record.id, record)).collect();
        let last_id = records.keys().next_back().map_or(0, |id| id.as_i64());

        Self {
            records: RwLock::new(records),
            last_id: AtomicI64::new(last_id),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn next_id(&self) -> MediaId {
        MediaId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    #[instrument(skip_all, fields(filters = query.pipeline.filters().len()))]
    async fn find_films(&self, query: &StoreQuery) -> Result<Vec<MediaRecord>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    async fn get(&self, id: MediaId) -> Result<Option<MediaRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord> {
        let record = MediaRecord::from_new(self.next_id(), record, Utc::now());
        self.records
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, mut record: MediaRecord) -> Result<MediaRecord> {
        let mut records = self.records.write().await;
        let existing = records
            .get_mut(&record.id)
            .ok_or(CatalogError::NotFound(record.id))?;

        record.created_at = existing.created_at;
        record.touch(Utc::now());
        *existing = record.clone();
        Ok(record)
    }

    async fn soft_delete(&self, id: MediaId) -> Result<MediaRecord> {
        let mut records = self.records.write().await;
        let existing = records.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        if !existing.is_deleted() {
            existing.soft_delete(Utc::now());
        }
        Ok(existing.clone())
    }

    async fn refresh_orderable_titles(&self) -> Result<usize> {
        Ok(0)
    }
}
