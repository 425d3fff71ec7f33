//! Full-text search collaborator.
//!
//! Providers return candidate ids for a term and maintain their own index
//! entries. The query engine treats the returned set as a membership filter
//! only; ranking is not part of the contract.

pub mod memory;
pub mod null;
pub mod timeout;

use std::collections::HashSet;

use async_trait::async_trait;
use reelshelf_model::{MediaId, SearchIndexEntry};

use crate::error::SearchError;

pub use memory::{InMemorySearchIndex, MatchMode};
pub use null::NullSearchProvider;
pub use timeout::TimedSearchProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Ids of every indexed record matching `term`. An empty set means "no
    /// matches"; failures must be reported as errors, never as empty sets.
    async fn search(&self, term: &str) -> Result<HashSet<MediaId>, SearchError>;

    /// Insert or replace the index entry for one record.
    async fn upsert(&self, entry: SearchIndexEntry) -> Result<(), SearchError>;

    async fn remove(&self, id: MediaId) -> Result<(), SearchError>;
}
