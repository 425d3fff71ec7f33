use std::fmt;

use reelshelf_model::MediaCategory;
use serde_json::json;
use sqlx::{Postgres, QueryBuilder, types::Json};

use crate::database::ports::StoreQuery;
use crate::query::filtering::StructuralFilter;

pub(crate) const MEDIA_COLUMNS: &str = "id, title, category, format, year, attributes, \
     poster_path, created_at, updated_at, deleted_at";

/// Translates a [`StoreQuery`] into one `SELECT` over `media`.
///
/// Attribute filters use JSONB containment: `[{"code": t}]` matches any
/// element whose code is exactly `t`, and `["name"]` matches a string
/// element equal to `name`. Both are case-sensitive, mirroring the
/// in-memory matcher.
pub(crate) struct FilteredFilmQueryBuilder<'a> {
    query: &'a StoreQuery,
    qb: QueryBuilder<'a, Postgres>,
}

impl<'a> fmt::Debug for FilteredFilmQueryBuilder<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredFilmQueryBuilder")
            .field("filters", &self.query.pipeline.filters())
            .field("include_deleted", &self.query.pipeline.include_deleted())
            .field("ids", &self.query.ids.as_ref().map(|ids| ids.len()))
            .field("query_builder", &"<sqlx::QueryBuilder<Postgres>>")
            .finish()
    }
}

impl<'a> FilteredFilmQueryBuilder<'a> {
    pub(crate) fn new(query: &'a StoreQuery) -> Self {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(MEDIA_COLUMNS);
        qb.push(" FROM media WHERE category = ");
        qb.push_bind(MediaCategory::Film.as_str());

        Self { query, qb }
    }

    pub(crate) fn build(mut self) -> QueryBuilder<'a, Postgres> {
        if !self.query.pipeline.include_deleted() {
            self.qb.push(" AND deleted_at IS NULL");
        }

        if let Some(ids) = &self.query.ids {
            let ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
            self.qb.push(" AND id = ANY(");
            self.qb.push_bind(ids);
            self.qb.push(")");
        }

        for filter in self.query.pipeline.filters() {
            self.push_filter(filter);
        }

        self.qb.push(" ORDER BY id");
        self.qb
    }

    fn push_filter(&mut self, filter: &StructuralFilter) {
        match filter {
            StructuralFilter::Format(format) => {
                self.qb.push(" AND format = ");
                self.qb.push_bind(format.as_str());
            }
            StructuralFilter::Year(year) => {
                self.qb.push(" AND year = ");
                self.qb.push_bind(*year);
            }
            StructuralFilter::Language(term) => self.push_code_or_name("languages", term),
            StructuralFilter::Country(term) => self.push_code_or_name("countries", term),
            StructuralFilter::Director(name) => {
                self.qb.push(" AND attributes->'directors' @> ");
                self.qb.push_bind(Json(json!([name])));
            }
        }
    }

    fn push_code_or_name(&mut self, key: &'static str, term: &str) {
        self.qb.push(" AND (attributes->'");
        self.qb.push(key);
        self.qb.push("' @> ");
        self.qb.push_bind(Json(json!([{ "code": term }])));
        self.qb.push(" OR attributes->'");
        self.qb.push(key);
        self.qb.push("' @> ");
        self.qb.push_bind(Json(json!([{ "name": term }])));
        self.qb.push(")");
    }
}
