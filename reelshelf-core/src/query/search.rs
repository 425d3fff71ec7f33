//! Combining the search provider's candidate set with structural filters.

use std::collections::HashSet;

use reelshelf_model::MediaId;
use tracing::debug;

use super::types::FilterCriteria;
use crate::{error::SearchError, search::SearchProvider};

/// Records a query may return before structural filters are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSet {
    /// No search term: every record is a candidate.
    All,
    /// The provider found nothing. The query result is empty.
    Empty,
    /// Only these ids may appear in the result.
    Only(HashSet<MediaId>),
}

impl CandidateSet {
    pub fn from_hits(hits: HashSet<MediaId>) -> Self {
        if hits.is_empty() {
            CandidateSet::Empty
        } else {
            CandidateSet::Only(hits)
        }
    }
}

/// Ask the provider for candidates when the criteria carry a search term.
///
/// The provider is not consulted without a term. Provider failures are
/// returned as-is so callers can tell them apart from "no matches".
pub async fn resolve_candidates<P>(
    provider: &P,
    criteria: &FilterCriteria,
) -> Result<CandidateSet, SearchError>
where
    P: SearchProvider + ?Sized,
{
    let Some(term) = criteria.search_term.as_deref() else {
        return Ok(CandidateSet::All);
    };

    let hits = provider.search(term).await?;
    debug!(term, hits = hits.len(), "resolved search candidates");
    Ok(CandidateSet::from_hits(hits))
}
