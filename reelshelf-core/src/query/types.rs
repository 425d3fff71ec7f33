use std::fmt;

use reelshelf_model::MediaFormat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pagination::{PageBounds, PageRequest};

/// Fields available for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Title,
    Year,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Year => "year",
        }
    }

    /// Interpret a query-string value. Anything unrecognised sorts by title.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("year") => SortField::Year,
            Some("title") | None | Some("") => SortField::Title,
            Some(other) => {
                debug!(sort = other, "unknown sort field, falling back to title");
                SortField::Title
            }
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Interpret a query-string value, case-insensitively. Unknown values
    /// fall back to `fallback`.
    pub fn from_param(raw: Option<&str>, fallback: SortDirection) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return fallback;
        };

        if raw.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else if raw.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            debug!(direction = raw, "unknown sort direction, using default");
            fallback
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defaults applied while turning raw request parameters into criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryPolicy {
    pub page_bounds: PageBounds,
    pub default_direction: SortDirection,
}

/// The validated, immutable description of one catalog query.
///
/// Text criteria are trimmed and never blank; `page` is at least 1 and
/// `page_size` already lies within the configured bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(rename = "q")]
    pub search_term: Option<String>,
    pub format: Option<MediaFormat>,
    pub year: Option<i32>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub director: Option<String>,
    pub sort: SortField,
    pub direction: SortDirection,
    pub page: u32,
    #[serde(rename = "perPage")]
    pub page_size: u32,
    #[serde(skip)]
    pub include_deleted: bool,
}

impl FilterCriteria {
    pub fn builder() -> FilterCriteriaBuilder {
        FilterCriteriaBuilder::new()
    }

    pub fn page_request(&self, bounds: &PageBounds) -> PageRequest {
        PageRequest::new(i64::from(self.page), i64::from(self.page_size), bounds)
    }

    pub fn has_search_term(&self) -> bool {
        self.search_term.is_some()
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteriaBuilder::new().build()
    }
}

/// Fluent API for building filter criteria
#[derive(Debug, Clone)]
pub struct FilterCriteriaBuilder {
    search_term: Option<String>,
    format: Option<MediaFormat>,
    year: Option<i32>,
    language: Option<String>,
    country: Option<String>,
    director: Option<String>,
    sort: SortField,
    direction: SortDirection,
    page: i64,
    page_size: Option<i64>,
    include_deleted: bool,
    bounds: PageBounds,
}

impl FilterCriteriaBuilder {
    pub fn new() -> Self {
        Self {
            search_term: None,
            format: None,
            year: None,
            language: None,
            country: None,
            director: None,
            sort: SortField::Title,
            direction: SortDirection::Asc,
            page: 1,
            page_size: None,
            include_deleted: false,
            bounds: PageBounds::default(),
        }
    }

    /// Apply the policy's page bounds and default direction.
    pub fn policy(mut self, policy: &QueryPolicy) -> Self {
        self.bounds = policy.page_bounds;
        self.direction = policy.default_direction;
        self
    }

    // === Filter methods ===

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = non_blank(term.into());
        self
    }

    pub fn format(mut self, format: MediaFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn language(mut self, term: impl Into<String>) -> Self {
        self.language = non_blank(term.into());
        self
    }

    pub fn country(mut self, term: impl Into<String>) -> Self {
        self.country = non_blank(term.into());
        self
    }

    pub fn director(mut self, name: impl Into<String>) -> Self {
        self.director = non_blank(name.into());
        self
    }

    /// Also consider soft-deleted records. Off unless explicitly requested.
    pub fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = include;
        self
    }

    // === Sort methods ===

    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = field;
        self.direction = direction;
        self
    }

    // === Pagination methods ===

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn build(self) -> FilterCriteria {
        let page_size = self
            .page_size
            .unwrap_or_else(|| i64::from(self.bounds.default));
        let request = PageRequest::new(self.page, page_size, &self.bounds);

        FilterCriteria {
            search_term: self.search_term,
            format: self.format,
            year: self.year,
            language: self.language,
            country: self.country,
            director: self.director,
            sort: self.sort,
            direction: self.direction,
            page: request.page(),
            page_size: request.page_size(),
            include_deleted: self.include_deleted,
        }
    }
}

impl Default for FilterCriteriaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters exactly as received from a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCatalogQuery {
    pub q: Option<String>,
    pub format: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<String>,
    #[serde(alias = "pageSize", alias = "per_page")]
    pub per_page: Option<String>,
}

impl RawCatalogQuery {
    /// Validate and coerce into criteria. Never fails: malformed values are
    /// dropped or replaced by their defaults.
    pub fn into_criteria(self, policy: &QueryPolicy) -> FilterCriteria {
        let mut builder = FilterCriteriaBuilder::new().policy(policy);

        if let Some(term) = self.q {
            builder = builder.search(term);
        }
        if let Some(format) = self.format.as_deref().and_then(parse_format) {
            builder = builder.format(format);
        }
        if let Some(year) = self.year.as_deref().and_then(parse_year) {
            builder = builder.year(year);
        }
        if let Some(language) = self.language {
            builder = builder.language(language);
        }
        if let Some(country) = self.country {
            builder = builder.country(country);
        }
        if let Some(director) = self.director {
            builder = builder.director(director);
        }

        let sort = SortField::from_param(self.sort.as_deref());
        let direction =
            SortDirection::from_param(self.direction.as_deref(), policy.default_direction);
        builder = builder.sort_by(sort, direction);

        let page = self.page.as_deref().and_then(parse_number).unwrap_or(1);
        builder = builder.page(page);
        if let Some(size) = self.per_page.as_deref().and_then(parse_number) {
            builder = builder.page_size(size);
        }

        builder.build()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_format(raw: &str) -> Option<MediaFormat> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(format) => Some(format),
        Err(err) => {
            debug!(%err, "ignoring format filter");
            None
        }
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(year) => Some(year),
        Err(_) => {
            debug!(year = raw, "ignoring non-numeric year filter");
            None
        }
    }
}

fn parse_number(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
