//! Structural (non-search) predicates derived from filter criteria.
//!
//! The pipeline is evaluated in Rust by the in-memory store and by the query
//! engine. The Postgres store translates the same [`StructuralFilter`] list
//! into SQL; both paths must accept exactly the same records.

use reelshelf_model::{MediaFormat, MediaRecord};

use super::{
    attributes::{matches_country, matches_director, matches_language},
    types::FilterCriteria,
};

/// One user-supplied restriction. Only criteria that were actually present
/// produce a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StructuralFilter {
    Format(MediaFormat),
    Year(i32),
    Language(String),
    Country(String),
    Director(String),
}

impl StructuralFilter {
    pub fn matches(&self, record: &MediaRecord) -> bool {
        match self {
            StructuralFilter::Format(format) => record.format == *format,
            StructuralFilter::Year(year) => record.year == *year,
            StructuralFilter::Language(term) => matches_language(&record.attributes, term),
            StructuralFilter::Country(term) => matches_country(&record.attributes, term),
            StructuralFilter::Director(name) => matches_director(&record.attributes, name),
        }
    }
}

/// Conjunction of the fixed base predicate and every structural filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPipeline {
    filters: Vec<StructuralFilter>,
    include_deleted: bool,
}

impl FilterPipeline {
    /// Pipeline with no user filters: every live film passes.
    pub fn base() -> Self {
        Self::default()
    }

    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut filters = Vec::new();

        if let Some(format) = criteria.format {
            filters.push(StructuralFilter::Format(format));
        }
        if let Some(year) = criteria.year {
            filters.push(StructuralFilter::Year(year));
        }
        if let Some(language) = &criteria.language {
            filters.push(StructuralFilter::Language(language.clone()));
        }
        if let Some(country) = &criteria.country {
            filters.push(StructuralFilter::Country(country.clone()));
        }
        if let Some(director) = &criteria.director {
            filters.push(StructuralFilter::Director(director.clone()));
        }

        Self {
            filters,
            include_deleted: criteria.include_deleted,
        }
    }

    pub fn with_filter(mut self, filter: StructuralFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(&self) -> &[StructuralFilter] {
        &self.filters
    }

    pub fn include_deleted(&self) -> bool {
        self.include_deleted
    }

    /// True when only the base predicate applies.
    pub fn is_unconstrained(&self) -> bool {
        self.filters.is_empty()
    }

    /// Only films, and only live ones unless deleted records were requested.
    pub fn accepts_base(&self, record: &MediaRecord) -> bool {
        record.is_film() && (self.include_deleted || !record.is_deleted())
    }

    pub fn accepts(&self, record: &MediaRecord) -> bool {
        self.accepts_base(record) && self.filters.iter().all(|filter| filter.matches(record))
    }
}
