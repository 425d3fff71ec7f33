//! Orchestrates one catalog query end to end.
//!
//! criteria → structural pipeline → search candidates → store fetch →
//! sort → paginate, with the directors facet computed independently of the
//! active filters.

use std::sync::Arc;

use reelshelf_model::{MediaFormat, MediaId, MediaRecord};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    facets::distinct_directors,
    filtering::FilterPipeline,
    pagination::{Page, PageBounds, paginate},
    search::{CandidateSet, resolve_candidates},
    sorting::sort_records,
    stats::CatalogStats,
    types::FilterCriteria,
};
use crate::{
    database::{CatalogStore, StoreQuery},
    error::{CatalogError, Result},
    search::SearchProvider,
};

/// Everything a catalog listing needs in one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub films: Page<MediaRecord>,
    pub directors: Vec<String>,
    pub formats: Vec<MediaFormat>,
    /// The criteria actually applied, after defaults and coercion.
    pub filters: FilterCriteria,
}

/// Stateless query service. Cloning is cheap and every call is independent.
#[derive(Clone)]
pub struct CatalogQueryEngine {
    store: Arc<dyn CatalogStore>,
    search: Arc<dyn SearchProvider>,
    bounds: PageBounds,
}

impl std::fmt::Debug for CatalogQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogQueryEngine")
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl CatalogQueryEngine {
    pub fn new(store: Arc<dyn CatalogStore>, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            store,
            search,
            bounds: PageBounds::default(),
        }
    }

    pub fn with_page_bounds(mut self, bounds: PageBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn page_bounds(&self) -> PageBounds {
        self.bounds
    }

    #[instrument(
        skip(self, criteria),
        fields(
            sort = %criteria.sort,
            direction = %criteria.direction,
            page = criteria.page,
            searching = criteria.has_search_term(),
        )
    )]
    pub async fn query(&self, criteria: FilterCriteria) -> Result<CatalogPage> {
        let request = criteria.page_request(&self.bounds);
        let pipeline = FilterPipeline::from_criteria(&criteria);

        let candidates = resolve_candidates(self.search.as_ref(), &criteria).await?;

        let films = match candidates {
            CandidateSet::Empty => {
                debug!("search returned no candidates");
                Page::empty(request)
            }
            candidates => {
                let mut store_query = StoreQuery::new(pipeline);
                if let CandidateSet::Only(ids) = candidates {
                    store_query = store_query.restrict_to(ids);
                }

                let mut records = self.store.find_films(&store_query).await?;
                // Stores may push down only part of the predicate.
                records.retain(|record| store_query.matches(record));

                sort_records(&mut records, criteria.sort, criteria.direction);
                paginate(records, request)
            }
        };

        let directors = self.directors().await?;

        debug!(total = films.total, returned = films.items.len(), "catalog query done");

        Ok(CatalogPage {
            films,
            directors,
            formats: MediaFormat::all().to_vec(),
            filters: FilterCriteria {
                page: request.page(),
                page_size: request.page_size(),
                ..criteria
            },
        })
    }

    /// One live film by id. Soft-deleted and non-film records are reported
    /// as missing.
    pub async fn film(&self, id: MediaId) -> Result<MediaRecord> {
        self.store
            .get(id)
            .await?
            .filter(|record| FilterPipeline::base().accepts_base(record))
            .ok_or(CatalogError::NotFound(id))
    }

    /// Directors across the whole live catalog, ignoring any filter.
    pub async fn directors(&self) -> Result<Vec<String>> {
        let films = self.store.all_films().await?;
        Ok(distinct_directors(&films))
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<CatalogStats> {
        let films = self.store.all_films().await?;
        Ok(CatalogStats::from_records(&films))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use async_trait::async_trait;
    use reelshelf_model::{FilmAttributes, MediaCategory, NewMediaRecord};

    use super::*;
    use crate::database::InMemoryCatalogStore;
    use crate::error::SearchError;
    use crate::search::MockSearchProvider;

    /// Store that ignores the query and counts calls, to observe pushdown
    /// gaps and short-circuits.
    #[derive(Default)]
    struct PermissiveStore {
        inner: InMemoryCatalogStore,
        find_calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl CatalogStore for PermissiveStore {
        async fn find_films(&self, _query: &StoreQuery) -> Result<Vec<MediaRecord>> {
            self.find_calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.find_films(&StoreQuery::default()).await
        }
        // Facet reads are not counted.
        async fn all_films(&self) -> Result<Vec<MediaRecord>> {
            self.inner.all_films().await
        }
        async fn get(&self, id: MediaId) -> Result<Option<MediaRecord>> {
            self.inner.get(id).await
        }
        async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord> {
            self.inner.insert(record).await
        }
        async fn update(&self, record: MediaRecord) -> Result<MediaRecord> {
            self.inner.update(record).await
        }
        async fn soft_delete(&self, id: MediaId) -> Result<MediaRecord> {
            self.inner.soft_delete(id).await
        }
        async fn refresh_orderable_titles(&self) -> Result<usize> {
            Ok(0)
        }
    }

    fn catalog() -> Vec<MediaRecord> {
        vec![
            MediaRecord::film(1, "The Matrix", MediaFormat::BluRay, 1999).with_attributes(
                FilmAttributes::default().with_directors(["Lana Wachowski", "Lilly Wachowski"]),
            ),
            MediaRecord::film(2, "Matrix Revolutions", MediaFormat::Dvd, 2003),
            MediaRecord::film(3, "Alien", MediaFormat::Dvd, 1979)
                .with_attributes(FilmAttributes::default().with_directors(["Ridley Scott"])),
        ]
    }

    fn permissive() -> Arc<PermissiveStore> {
        Arc::new(PermissiveStore {
            inner: InMemoryCatalogStore::with_records(catalog()),
            ..PermissiveStore::default()
        })
    }

    #[tokio::test]
    async fn engine_applies_filters_the_store_skipped() {
        let store = permissive();
        let mut search = MockSearchProvider::new();
        search.expect_search().never();
        let engine = CatalogQueryEngine::new(store, Arc::new(search));

        let page = engine
            .query(FilterCriteria::builder().format(MediaFormat::Dvd).build())
            .await
            .unwrap();
        let ids: Vec<_> = page.films.items.iter().map(|r| r.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(page.films.total, 2);
    }

    #[tokio::test]
    async fn empty_search_result_skips_the_store() {
        let store = permissive();
        let mut search = MockSearchProvider::new();
        search.expect_search().returning(|_| Ok(HashSet::new()));
        let engine = CatalogQueryEngine::new(store.clone(), Arc::new(search));

        let page = engine
            .query(FilterCriteria::builder().search("Nothing").build())
            .await
            .unwrap();

        assert_eq!(page.films.total, 0);
        assert_eq!(page.films.last_page, 1);
        assert_eq!(
            store.find_calls.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
        // Facets are still computed from the whole catalog.
        assert_eq!(page.directors.len(), 3);
    }

    #[tokio::test]
    async fn search_failure_surfaces_as_unavailable() {
        let mut search = MockSearchProvider::new();
        search
            .expect_search()
            .returning(|_| Err(SearchError::Backend("timeout".into())));
        let engine = CatalogQueryEngine::new(permissive(), Arc::new(search));

        let err = engine
            .query(FilterCriteria::builder().search("Matrix").build())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::SearchUnavailable(_)));
    }

    #[tokio::test]
    async fn echoes_effective_criteria_and_formats() {
        let mut search = MockSearchProvider::new();
        search.expect_search().never();
        let engine = CatalogQueryEngine::new(permissive(), Arc::new(search))
            .with_page_bounds(PageBounds::new(5, 20, 5));

        let criteria = FilterCriteria::builder().page_size(50).build();
        let page = engine.query(criteria).await.unwrap();

        assert_eq!(page.filters.page_size, 20);
        assert_eq!(page.films.page_size, 20);
        assert_eq!(page.formats, MediaFormat::all().to_vec());
    }

    #[tokio::test]
    async fn film_lookup_hides_deleted_and_non_film_records() {
        let store = Arc::new(InMemoryCatalogStore::with_records([
            MediaRecord::film(1, "Alien", MediaFormat::Dvd, 1979),
            MediaRecord::film(2, "Heat", MediaFormat::Dvd, 1995),
            MediaRecord::film(3, "Twin Peaks", MediaFormat::Dvd, 1990)
                .with_category(MediaCategory::Tv),
        ]));
        store.soft_delete(MediaId(2)).await.unwrap();
        let engine = CatalogQueryEngine::new(store, Arc::new(MockSearchProvider::new()));

        assert_eq!(engine.film(MediaId(1)).await.unwrap().title, "Alien");
        for missing in [2, 3, 99] {
            assert!(matches!(
                engine.film(MediaId(missing)).await,
                Err(CatalogError::NotFound(id)) if id == MediaId(missing)
            ));
        }
    }
}
