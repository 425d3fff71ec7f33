use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use reelshelf_core::{
    application::{FilmUpdate, NewFilm},
    model::{MediaId, MediaRecord},
    query::{CatalogPage, CatalogStats, RawCatalogQuery},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::{AppState, errors::AppResult};

/// List films. Query parameters are coerced, never rejected.
#[instrument(skip_all)]
pub async fn list_films_handler(
    State(state): State<AppState>,
    Query(raw): Query<RawCatalogQuery>,
) -> AppResult<Json<CatalogPage>> {
    let criteria = raw.into_criteria(&state.policy);
    let page = state.engine.query(criteria).await?;
    Ok(Json(page))
}

pub async fn get_film_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MediaRecord>> {
    let film = state.engine.film(MediaId(id)).await?;
    Ok(Json(film))
}

pub async fn directors_handler(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.engine.directors().await?))
}

pub async fn stats_handler(State(state): State<AppState>) -> AppResult<Json<CatalogStats>> {
    Ok(Json(state.engine.stats().await?))
}

pub async fn create_film_handler(
    State(state): State<AppState>,
    Json(film): Json<NewFilm>,
) -> AppResult<(StatusCode, Json<MediaRecord>)> {
    let record = state.writer.create_film(film).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_film_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<FilmUpdate>,
) -> AppResult<Json<MediaRecord>> {
    let record = state.writer.update_film(MediaId(id), update).await?;
    Ok(Json(record))
}

pub async fn delete_film_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    // Deleting an already deleted film is a no-op.
    state.writer.delete_film(MediaId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reindex_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let indexed = state.writer.reindex_all().await?;
    Ok(Json(json!({ "indexed": indexed })))
}
