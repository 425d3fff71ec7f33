use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use reelshelf_core::{
    CatalogError, SearchError,
    application::{CatalogWriter, FilmUpdate, NewFilm},
    database::{CatalogStore, InMemoryCatalogStore},
    model::{CodeName, FilmAttributes, MediaFormat, MediaId, MediaRecord, SearchIndexEntry},
    query::{
        CatalogQueryEngine, FilterCriteria, PageBounds, QueryPolicy, RawCatalogQuery, SortDirection,
        SortField,
    },
    search::{InMemorySearchIndex, MatchMode, SearchProvider},
};

/// Provider returning a fixed candidate set, regardless of the term.
#[derive(Debug)]
struct FixedHits(HashSet<MediaId>);

#[async_trait]
impl SearchProvider for FixedHits {
    async fn search(&self, _term: &str) -> Result<HashSet<MediaId>, SearchError> {
        Ok(self.0.clone())
    }
    async fn upsert(&self, _entry: SearchIndexEntry) -> Result<(), SearchError> {
        Ok(())
    }
    async fn remove(&self, _id: MediaId) -> Result<(), SearchError> {
        Ok(())
    }
}

#[derive(Debug)]
struct Offline;

#[async_trait]
impl SearchProvider for Offline {
    async fn search(&self, _term: &str) -> Result<HashSet<MediaId>, SearchError> {
        Err(SearchError::Backend("connection refused".into()))
    }
    async fn upsert(&self, _entry: SearchIndexEntry) -> Result<(), SearchError> {
        Err(SearchError::Backend("connection refused".into()))
    }
    async fn remove(&self, _id: MediaId) -> Result<(), SearchError> {
        Err(SearchError::Backend("connection refused".into()))
    }
}

fn english() -> CodeName {
    CodeName::new("en", "English")
}

fn catalog() -> Vec<MediaRecord> {
    vec![
        MediaRecord::film(1, "The Matrix", MediaFormat::Dvd, 1999).with_attributes(
            FilmAttributes::default()
                .with_directors(["Lana Wachowski", "Lilly Wachowski"])
                .with_languages(vec![english()])
                .with_countries(vec![CodeName::new("US", "United States")]),
        ),
        MediaRecord::film(2, "Matrix Revolutions", MediaFormat::BluRay, 2003).with_attributes(
            FilmAttributes::default()
                .with_directors(["Lana Wachowski", "Lilly Wachowski"])
                .with_languages(vec![english()]),
        ),
        MediaRecord::film(3, "The Godfather", MediaFormat::Dvd, 1972).with_attributes(
            FilmAttributes::default()
                .with_directors(["Francis Ford Coppola"])
                .with_languages(vec![english(), CodeName::new("it", "Italian")]),
        ),
    ]
}

fn engine_with(search: Arc<dyn SearchProvider>, records: Vec<MediaRecord>) -> CatalogQueryEngine {
    CatalogQueryEngine::new(Arc::new(InMemoryCatalogStore::with_records(records)), search)
}

fn titles(page: &reelshelf_core::query::CatalogPage) -> Vec<&str> {
    page.films.items.iter().map(|r| r.title.as_str()).collect()
}

fn id_set(page: &reelshelf_core::query::CatalogPage) -> HashSet<i64> {
    page.films.items.iter().map(|r| r.id.as_i64()).collect()
}

fn criteria(pairs: &[(&str, &str)]) -> FilterCriteria {
    let mut raw = RawCatalogQuery::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "q" => raw.q = value,
            "format" => raw.format = value,
            "language" => raw.language = value,
            "country" => raw.country = value,
            "director" => raw.director = value,
            "year" => raw.year = value,
            "sort" => raw.sort = value,
            "direction" => raw.direction = value,
            "page" => raw.page = value,
            "perPage" => raw.per_page = value,
            other => panic!("unknown parameter {other}"),
        }
    }
    raw.into_criteria(&QueryPolicy::default())
}

#[tokio::test]
async fn title_sort_uses_orderable_title() {
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), catalog());

    let page = engine
        .query(criteria(&[("sort", "title"), ("direction", "asc")]))
        .await
        .unwrap();

    assert_eq!(
        titles(&page),
        vec!["The Godfather", "The Matrix", "Matrix Revolutions"]
    );
}

#[tokio::test]
async fn year_sort_descending() {
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), catalog());

    let page = engine
        .query(criteria(&[("sort", "year"), ("direction", "desc")]))
        .await
        .unwrap();

    assert_eq!(
        titles(&page),
        vec!["Matrix Revolutions", "The Matrix", "The Godfather"]
    );
}

#[tokio::test]
async fn filters_are_conjunctive() {
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), catalog());

    let page = engine
        .query(criteria(&[("format", "DVD"), ("year", "1999")]))
        .await
        .unwrap();
    assert_eq!(id_set(&page), HashSet::from([1]));

    let page = engine
        .query(criteria(&[("format", "DVD"), ("year", "2003")]))
        .await
        .unwrap();
    assert!(page.films.items.is_empty());
    assert_eq!(page.films.total, 0);
}

#[tokio::test]
async fn search_narrows_structural_matches() {
    let hits = HashSet::from([MediaId(1), MediaId(2)]);
    let engine = engine_with(Arc::new(FixedHits(hits)), catalog());

    let page = engine
        .query(criteria(&[("q", "Matrix"), ("language", "en")]))
        .await
        .unwrap();

    assert_eq!(id_set(&page), HashSet::from([1, 2]));
}

#[tokio::test]
async fn zero_candidates_yield_an_empty_page() {
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), catalog());

    let page = engine.query(criteria(&[("q", "Nothing")])).await.unwrap();

    assert!(page.films.items.is_empty());
    assert_eq!(page.films.total, 0);
    assert_eq!(page.films.last_page, 1);
    assert!(!page.directors.is_empty());
}

#[tokio::test]
async fn language_and_country_match_code_or_name_exactly() {
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), catalog());

    for term in ["en", "English"] {
        let page = engine.query(criteria(&[("language", term)])).await.unwrap();
        assert_eq!(page.films.total, 3, "language {term}");
    }
    for term in ["eng", "english", "EN"] {
        let page = engine.query(criteria(&[("language", term)])).await.unwrap();
        assert_eq!(page.films.total, 0, "language {term}");
    }

    let page = engine.query(criteria(&[("language", "Italian")])).await.unwrap();
    assert_eq!(id_set(&page), HashSet::from([3]));

    let page = engine
        .query(criteria(&[("country", "United States")]))
        .await
        .unwrap();
    assert_eq!(id_set(&page), HashSet::from([1]));
}

#[tokio::test]
async fn director_filter_is_exact() {
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), catalog());

    let page = engine
        .query(criteria(&[("director", "Lana Wachowski")]))
        .await
        .unwrap();
    assert_eq!(id_set(&page), HashSet::from([1, 2]));

    let page = engine
        .query(criteria(&[("director", "lana wachowski")]))
        .await
        .unwrap();
    assert_eq!(page.films.total, 0);
}

#[tokio::test]
async fn repeated_queries_page_identically() {
    let records: Vec<MediaRecord> = (1..=35)
        .map(|id| MediaRecord::film(id, format!("Same Title {}", id % 3), MediaFormat::Dvd, 2000))
        .collect();
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), records);

    let params = [("sort", "title"), ("page", "2"), ("perPage", "10")];
    let first = engine.query(criteria(&params)).await.unwrap();
    let second = engine.query(criteria(&params)).await.unwrap();

    assert_eq!(first.films, second.films);
    assert_eq!(first.films.items.len(), 10);
    assert_eq!(first.films.total, 35);
    assert_eq!(first.films.last_page, 4);
}

#[tokio::test]
async fn page_size_is_clamped_to_bounds() {
    let records: Vec<MediaRecord> = (1..=120)
        .map(|id| MediaRecord::film(id, format!("Film {id:03}"), MediaFormat::Vhs, 1990))
        .collect();
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), records);

    let page = engine.query(criteria(&[("perPage", "0")])).await.unwrap();
    assert_eq!(page.films.page_size, 10);
    assert_eq!(page.films.items.len(), 10);

    let page = engine.query(criteria(&[("perPage", "10000")])).await.unwrap();
    assert_eq!(page.films.page_size, 100);
    assert_eq!(page.films.items.len(), 100);
    assert_eq!(page.filters.page_size, 100);
}

#[tokio::test]
async fn custom_bounds_apply_at_query_time() {
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), catalog())
        .with_page_bounds(PageBounds::new(1, 2, 2));

    let page = engine.query(criteria(&[])).await.unwrap();
    assert_eq!(page.films.items.len(), 2);
    assert_eq!(page.films.last_page, 2);
}

#[tokio::test]
async fn distinct_directors_have_no_duplicates_or_blanks() {
    let records = vec![
        MediaRecord::film(1, "Inception", MediaFormat::BluRay, 2010)
            .with_attributes(FilmAttributes::default().with_directors(["Christopher Nolan"])),
        MediaRecord::film(2, "Memento", MediaFormat::Dvd, 2000)
            .with_attributes(FilmAttributes::default().with_directors(["Christopher Nolan", " "])),
        MediaRecord::film(3, "Amélie", MediaFormat::Dvd, 2001),
        MediaRecord::film(4, "Arrival", MediaFormat::BluRay, 2016)
            .with_attributes(FilmAttributes::default().with_directors(["Denis Villeneuve"])),
    ];
    let engine = engine_with(Arc::new(FixedHits(HashSet::new())), records);

    assert_eq!(
        engine.directors().await.unwrap(),
        vec!["Christopher Nolan", "Denis Villeneuve"]
    );
}

#[tokio::test]
async fn provider_failure_is_distinct_from_no_results() {
    let engine = engine_with(Arc::new(Offline), catalog());

    let err = engine.query(criteria(&[("q", "Matrix")])).await.unwrap_err();
    assert!(matches!(err, CatalogError::SearchUnavailable(_)));

    // Queries without a term never consult the provider.
    let page = engine.query(criteria(&[])).await.unwrap();
    assert_eq!(page.films.total, 3);
}

#[tokio::test]
async fn writes_keep_sort_keys_and_search_in_step() {
    let store = Arc::new(InMemoryCatalogStore::new());
    let index = Arc::new(InMemorySearchIndex::new(MatchMode::Fuzzy));
    let writer = CatalogWriter::new(store.clone(), index.clone());
    let engine = CatalogQueryEngine::new(store.clone(), index.clone());

    let godfather = writer
        .create_film(NewFilm::new("The Godfather", MediaFormat::Dvd, 1972))
        .await
        .unwrap();
    writer
        .create_film(NewFilm::new("Matrix Revolutions", MediaFormat::BluRay, 2003))
        .await
        .unwrap();
    writer
        .update_film(
            godfather.id,
            FilmUpdate {
                title: Some("The Matrix".into()),
                year: Some(1999),
                ..FilmUpdate::default()
            },
        )
        .await
        .unwrap();

    for record in store.all_films().await.unwrap() {
        assert_eq!(
            record.orderable_title(),
            reelshelf_core::query::titles::orderable_title(&record.title)
        );
    }

    let page = engine
        .query(
            FilterCriteria::builder()
                .search("matrix")
                .sort_by(SortField::Title, SortDirection::Asc)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(titles(&page), vec!["The Matrix", "Matrix Revolutions"]);

    writer.delete_film(godfather.id).await.unwrap();
    let page = engine
        .query(FilterCriteria::builder().search("matrix").build())
        .await
        .unwrap();
    assert_eq!(titles(&page), vec!["Matrix Revolutions"]);
}

#[tokio::test]
async fn stats_cover_live_films_only() {
    let store = Arc::new(InMemoryCatalogStore::with_records(catalog()));
    store.soft_delete(MediaId(3)).await.unwrap();
    let engine = CatalogQueryEngine::new(store, Arc::new(FixedHits(HashSet::new())));

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.films_count, 2);
    let decades: Vec<_> = stats.decades.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(decades, vec!["1990s", "2000s"]);
}
