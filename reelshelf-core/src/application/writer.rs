//! Write path: validation, persistence and search-index maintenance.
//!
//! The store is the source of truth. Index updates run after a successful
//! write and their failures are only logged; the index catches up on the
//! next write or a full [`CatalogWriter::reindex_all`].

use std::sync::Arc;

use futures::{StreamExt, stream};
use reelshelf_model::{
    CodeName, FilmAttributes, MediaCategory, MediaFormat, MediaId, MediaRecord, NewMediaRecord,
    SearchIndexEntry,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    database::CatalogStore,
    error::{CatalogError, Result},
    search::SearchProvider,
};

const REINDEX_CONCURRENCY: usize = 8;

/// Input for a new film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilm {
    pub title: String,
    pub format: MediaFormat,
    pub year: i32,
    #[serde(default)]
    pub attributes: FilmAttributes,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl NewFilm {
    pub fn new(title: impl Into<String>, format: MediaFormat, year: i32) -> Self {
        Self {
            title: title.into(),
            format,
            year,
            attributes: FilmAttributes::default(),
            poster_path: None,
        }
    }

    pub fn with_attributes(mut self, attributes: FilmAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilmUpdate {
    pub title: Option<String>,
    pub format: Option<MediaFormat>,
    pub year: Option<i32>,
    pub attributes: Option<FilmAttributes>,
    pub poster_path: Option<String>,
}

#[derive(Clone)]
pub struct CatalogWriter {
    store: Arc<dyn CatalogStore>,
    search: Arc<dyn SearchProvider>,
}

impl std::fmt::Debug for CatalogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWriter").finish_non_exhaustive()
    }
}

impl CatalogWriter {
    pub fn new(store: Arc<dyn CatalogStore>, search: Arc<dyn SearchProvider>) -> Self {
        Self { store, search }
    }

    #[instrument(skip(self, film), fields(title = %film.title))]
    pub async fn create_film(&self, film: NewFilm) -> Result<MediaRecord> {
        let title = validate_title(&film.title)?;
        validate_attributes(&film.attributes)?;

        let record = self
            .store
            .insert(NewMediaRecord {
                title,
                category: MediaCategory::Film,
                format: film.format,
                year: film.year,
                attributes: film.attributes,
                poster_path: film.poster_path,
            })
            .await?;

        self.index(&record).await;
        Ok(record)
    }

    #[instrument(skip(self, update))]
    pub async fn update_film(&self, id: MediaId, update: FilmUpdate) -> Result<MediaRecord> {
        let mut record = self
            .store
            .get(id)
            .await?
            .filter(|record| record.is_film() && !record.is_deleted())
            .ok_or(CatalogError::NotFound(id))?;

        if let Some(title) = update.title {
            record.set_title(validate_title(&title)?);
        }
        if let Some(format) = update.format {
            record.format = format;
        }
        if let Some(year) = update.year {
            record.year = year;
        }
        if let Some(attributes) = update.attributes {
            validate_attributes(&attributes)?;
            record.attributes = attributes;
        }
        if let Some(poster_path) = update.poster_path {
            record.poster_path = Some(poster_path);
        }

        let record = self.store.update(record).await?;
        self.index(&record).await;
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn delete_film(&self, id: MediaId) -> Result<MediaRecord> {
        // Already deleted films pass so that deleting twice stays a no-op.
        self.store
            .get(id)
            .await?
            .filter(MediaRecord::is_film)
            .ok_or(CatalogError::NotFound(id))?;

        let record = self.store.soft_delete(id).await?;
        if let Err(err) = self.search.remove(id).await {
            warn!(%id, error = %err, "failed to remove search entry");
        }
        Ok(record)
    }

    /// Push every live film into the search index. Returns the number of
    /// entries written successfully.
    #[instrument(skip(self))]
    pub async fn reindex_all(&self) -> Result<usize> {
        let films = self.store.all_films().await?;
        let total = films.len();

        let indexed = stream::iter(films)
            .map(|record| {
                let search = Arc::clone(&self.search);
                async move {
                    match search.upsert(SearchIndexEntry::from(&record)).await {
                        Ok(()) => true,
                        Err(err) => {
                            warn!(id = %record.id, error = %err, "failed to index film");
                            false
                        }
                    }
                }
            })
            .buffer_unordered(REINDEX_CONCURRENCY)
            .filter(|ok| futures::future::ready(*ok))
            .count()
            .await;

        info!(indexed, total, "search index rebuilt");
        Ok(indexed)
    }

    /// Recompute stored title sort keys that predate the current rule.
    pub async fn backfill_orderable_titles(&self) -> Result<usize> {
        self.store.refresh_orderable_titles().await
    }

    async fn index(&self, record: &MediaRecord) {
        if let Err(err) = self.search.upsert(SearchIndexEntry::from(record)).await {
            warn!(id = %record.id, error = %err, "failed to update search entry");
        }
    }
}

fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidRecord("title is required".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_attributes(attributes: &FilmAttributes) -> Result<()> {
    check_code_names("countries", attributes.countries())?;
    check_code_names("languages", attributes.languages())
}

fn check_code_names(key: &str, entries: &[CodeName]) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.code.trim().is_empty() || entry.name.trim().is_empty() {
            return Err(CatalogError::InvalidRecord(format!(
                "{key}[{index}] needs both a code and a name"
            )));
        }
    }
    Ok(())
}
