//! Intentional query surface consumed by the HTTP layer and other clients.

pub use super::engine::{CatalogPage, CatalogQueryEngine};
pub use super::facets::distinct_directors;
pub use super::pagination::{Page, PageBounds};
pub use super::sorting::compare_records;
pub use super::stats::CatalogStats;
pub use super::types::{
    FilterCriteria, FilterCriteriaBuilder, QueryPolicy, RawCatalogQuery, SortDirection,
    SortField,
};
