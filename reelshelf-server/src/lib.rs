//! # Reelshelf Server
//!
//! HTTP surface over the catalog query engine: browsing with filters,
//! search and pagination, plus the curation endpoints that keep the store
//! and the search index in step.

pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::health::ping_handler))
        .merge(routes::create_api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
