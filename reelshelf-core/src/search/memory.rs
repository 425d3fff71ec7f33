//! Process-local search index.
//!
//! Titles are matched with a skim/fzf-like scorer, so `"mtrx"` finds
//! "The Matrix". A numeric term additionally matches records released in
//! that exact year.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use reelshelf_model::{MediaId, SearchIndexEntry};
use tokio::sync::RwLock;
use tracing::debug;

use super::SearchProvider;
use crate::error::SearchError;

/// How a term is compared against indexed titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-insensitive subsequence match.
    #[default]
    Fuzzy,
    /// Case-insensitive substring match.
    Substring,
}

#[derive(Debug, Default)]
pub struct InMemorySearchIndex {
    entries: RwLock<HashMap<MediaId, SearchIndexEntry>>,
    mode: MatchMode,
}

impl InMemorySearchIndex {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            mode,
        }
    }

    /// Build an index pre-populated with `entries`.
    pub fn with_entries(mode: MatchMode, entries: impl IntoIterator<Item = SearchIndexEntry>) -> Self {
        let entries = entries.into_iter().map(|entry| (entry.id, entry)).collect();
        Self {
            entries: RwLock::new(entries),
            mode,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SearchProvider for InMemorySearchIndex {
    async fn search(&self, term: &str) -> Result<HashSet<MediaId>, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(HashSet::new());
        }

        let year: Option<i32> = term.parse().ok();
        let term_lower = term.to_lowercase();
        let matcher = SkimMatcherV2::default().ignore_case();

        let entries = self.entries.read().await;
        let hits: HashSet<MediaId> = entries
            .values()
            .filter(|entry| {
                if year == Some(entry.year) {
                    return true;
                }
                match self.mode {
                    MatchMode::Fuzzy => matcher.fuzzy_match(&entry.title, term).is_some(),
                    MatchMode::Substring => entry.title.to_lowercase().contains(&term_lower),
                }
            })
            .map(|entry| entry.id)
            .collect();

        debug!(term, hits = hits.len(), indexed = entries.len(), "in-memory search");
        Ok(hits)
    }

    async fn upsert(&self, entry: SearchIndexEntry) -> Result<(), SearchError> {
        self.entries.write().await.insert(entry.id, entry);
        Ok(())
    }

    async fn remove(&self, id: MediaId) -> Result<(), SearchError> {
        self.entries.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, title: &str, year: i32) -> SearchIndexEntry {
        SearchIndexEntry {
            id: MediaId(id),
            title: title.to_string(),
            year,
        }
    }

    fn index(mode: MatchMode) -> InMemorySearchIndex {
        InMemorySearchIndex::with_entries(
            mode,
            [
                entry(1, "The Matrix", 1999),
                entry(2, "Matrix Revolutions", 2003),
                entry(3, "Alien", 1979),
            ],
        )
    }

    fn ids(values: &[i64]) -> HashSet<MediaId> {
        values.iter().copied().map(MediaId).collect()
    }

    #[tokio::test]
    async fn matches_titles_case_insensitively() {
        let index = index(MatchMode::Fuzzy);
        assert_eq!(index.search("matrix").await.unwrap(), ids(&[1, 2]));
        assert_eq!(index.search("ALIEN").await.unwrap(), ids(&[3]));
    }

    #[tokio::test]
    async fn fuzzy_mode_tolerates_gaps() {
        let index = index(MatchMode::Fuzzy);
        assert_eq!(index.search("mtrx rev").await.unwrap(), ids(&[2]));
    }

    #[tokio::test]
    async fn substring_mode_requires_contiguous_match() {
        let index = index(MatchMode::Substring);
        assert!(index.search("mtrx").await.unwrap().is_empty());
        assert_eq!(index.search("atri").await.unwrap(), ids(&[1, 2]));
    }

    #[tokio::test]
    async fn numeric_term_matches_year() {
        let index = index(MatchMode::Substring);
        assert_eq!(index.search("1979").await.unwrap(), ids(&[3]));
    }

    #[tokio::test]
    async fn no_match_is_empty_not_error() {
        let index = index(MatchMode::Fuzzy);
        assert_eq!(index.search("zzzz").await, Ok(HashSet::new()));
    }

    #[tokio::test]
    async fn upsert_replaces_and_remove_drops() {
        let index = index(MatchMode::Substring);
        index.upsert(entry(3, "Aliens", 1986)).await.unwrap();
        assert_eq!(index.len().await, 3);
        assert_eq!(index.search("1986").await.unwrap(), ids(&[3]));

        index.remove(MediaId(3)).await.unwrap();
        assert!(index.search("alien").await.unwrap().is_empty());
    }
}
