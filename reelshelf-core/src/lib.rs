//! Catalog query engine and persistence for Reelshelf.
//!
//! The engine turns client filter, sort and search parameters into a
//! deterministic page of films:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use reelshelf_core::{
//!     database::InMemoryCatalogStore,
//!     query::{CatalogQueryEngine, QueryPolicy, RawCatalogQuery},
//!     search::{InMemorySearchIndex, MatchMode},
//! };
//!
//! # async fn demo() -> reelshelf_core::Result<()> {
//! let engine = CatalogQueryEngine::new(
//!     Arc::new(InMemoryCatalogStore::new()),
//!     Arc::new(InMemorySearchIndex::new(MatchMode::Fuzzy)),
//! );
//!
//! let raw = RawCatalogQuery {
//!     q: Some("matrix".into()),
//!     sort: Some("year".into()),
//!     ..RawCatalogQuery::default()
//! };
//! let page = engine.query(raw.into_criteria(&QueryPolicy::default())).await?;
//! println!("{} of {} films", page.films.items.len(), page.films.total);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Write-side use cases (create, update, delete, reindex)
pub mod application;

/// Store port and adapters
pub mod database;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Error types and error handling utilities
pub mod error;

/// Criteria, filtering, sorting, pagination and the query engine
pub mod query;

/// Search provider port and implementations
pub mod search;

pub use error::{CatalogError, Result, SearchError};
pub use reelshelf_model as model;
