//! Postgres adapter for the catalog store.
//!
//! # Schema Reference
//!
//! One table, `media` (`id`, `title`, `orderable_title`, `category`,
//! `format`, `year`, `attributes` JSONB, `poster_path`, `created_at`,
//! `updated_at`, `deleted_at`). See `reelshelf-core/migrations`.

mod query_builder;

use std::{fmt, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reelshelf_model::{
    FilmAttributes, MediaId, MediaRecord, NewMediaRecord, orderable_title,
};
use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};
use tracing::{info, instrument};

use self::query_builder::{FilteredFilmQueryBuilder, MEDIA_COLUMNS};
use super::ports::{CatalogStore, StoreQuery};
use crate::error::{CatalogError, Result};

#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl fmt::Debug for PostgresCatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresCatalogStore")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;
        info!(max_connections, "connected to postgres");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MediaRow {
    id: i64,
    title: String,
    category: String,
    format: String,
    year: i32,
    attributes: serde_json::Value,
    poster_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<MediaRow> for MediaRecord {
    type Error = CatalogError;

    fn try_from(row: MediaRow) -> Result<Self> {
        let new = NewMediaRecord {
            title: row.title,
            category: row.category.parse()?,
            format: row.format.parse()?,
            year: row.year,
            attributes: FilmAttributes::from_json_value(&row.attributes),
            poster_path: row.poster_path,
        };
        Ok(MediaRecord::restore(
            MediaId(row.id),
            new,
            row.created_at,
            row.updated_at,
            row.deleted_at,
        ))
    }
}

fn into_records(rows: Vec<MediaRow>) -> Result<Vec<MediaRecord>> {
    rows.into_iter().map(MediaRecord::try_from).collect()
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    #[instrument(skip_all, fields(filters = query.pipeline.filters().len()))]
    async fn find_films(&self, query: &StoreQuery) -> Result<Vec<MediaRecord>> {
        let mut qb = FilteredFilmQueryBuilder::new(query).build();
        let rows: Vec<MediaRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;
        into_records(rows)
    }

    async fn get(&self, id: MediaId) -> Result<Option<MediaRecord>> {
        let sql = format!("SELECT {MEDIA_COLUMNS} FROM media WHERE id = $1");
        let row: Option<MediaRow> = sqlx::query_as(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;
        row.map(MediaRecord::try_from).transpose()
    }

    async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord> {
        let sql = format!(
            "INSERT INTO media \
             (title, orderable_title, category, format, year, attributes, poster_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {MEDIA_COLUMNS}"
        );
        let row: MediaRow = sqlx::query_as(&sql)
            .bind(&record.title)
            .bind(orderable_title(&record.title))
            .bind(record.category.as_str())
            .bind(record.format.as_str())
            .bind(record.year)
            .bind(Json(record.attributes.to_json_value()))
            .bind(&record.poster_path)
            .fetch_one(&self.pool)
            .await?;
        MediaRecord::try_from(row)
    }

    async fn update(&self, record: MediaRecord) -> Result<MediaRecord> {
        let sql = format!(
            "UPDATE media SET \
             title = $2, orderable_title = $3, category = $4, format = $5, year = $6, \
             attributes = $7, poster_path = $8, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {MEDIA_COLUMNS}"
        );
        let row: Option<MediaRow> = sqlx::query_as(&sql)
            .bind(record.id.as_i64())
            .bind(&record.title)
            .bind(record.orderable_title())
            .bind(record.category.as_str())
            .bind(record.format.as_str())
            .bind(record.year)
            .bind(Json(record.attributes.to_json_value()))
            .bind(&record.poster_path)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(CatalogError::NotFound(record.id))
            .and_then(MediaRecord::try_from)
    }

    async fn soft_delete(&self, id: MediaId) -> Result<MediaRecord> {
        let sql = format!(
            "UPDATE media SET \
             updated_at = CASE WHEN deleted_at IS NULL THEN NOW() ELSE updated_at END, \
             deleted_at = COALESCE(deleted_at, NOW()) \
             WHERE id = $1 \
             RETURNING {MEDIA_COLUMNS}"
        );
        let row: Option<MediaRow> = sqlx::query_as(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(CatalogError::NotFound(id))
            .and_then(MediaRecord::try_from)
    }

    #[instrument(skip(self))]
    async fn refresh_orderable_titles(&self) -> Result<usize> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, title, orderable_title FROM media")
                .fetch_all(&self.pool)
                .await?;

        let stale: Vec<(i64, String)> = rows
            .into_iter()
            .filter_map(|(id, title, stored)| {
                let expected = orderable_title(&title);
                (expected != stored).then_some((id, expected))
            })
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for (id, key) in &stale {
            sqlx::query("UPDATE media SET orderable_title = $2 WHERE id = $1")
                .bind(id)
                .bind(key)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!(updated = stale.len(), "refreshed orderable titles");
        Ok(stale.len())
    }
}
