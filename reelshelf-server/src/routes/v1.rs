use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, handlers::films};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/films",
            get(films::list_films_handler).post(films::create_film_handler),
        )
        .route("/films/stats", get(films::stats_handler))
        .route("/films/directors", get(films::directors_handler))
        .route(
            "/films/{id}",
            get(films::get_film_handler)
                .patch(films::update_film_handler)
                .delete(films::delete_film_handler),
        )
        .route("/search/reindex", post(films::reindex_handler))
}
