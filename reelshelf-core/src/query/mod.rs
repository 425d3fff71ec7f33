pub mod attributes;
pub mod engine;
pub mod facets;
pub mod filtering;
pub mod pagination;
pub mod prelude;
pub mod search;
pub mod sorting;
pub mod stats;
pub mod titles;
pub mod types;

pub use engine::{CatalogPage, CatalogQueryEngine};
pub use filtering::{FilterPipeline, StructuralFilter};
pub use pagination::{Page, PageBounds, PageRequest, paginate};
pub use search::{CandidateSet, resolve_candidates};
pub use sorting::*;
pub use stats::{Bucket, CatalogStats};
pub use types::*;
