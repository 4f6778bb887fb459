use axum::routing::get;
use axum::Router;
use sqlx::sqlite::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod endpoint_handlers;
pub mod error;
pub mod responses;

use crate::endpoint_handlers::{create_band, get_band, get_bands, get_bands_by_genre};

#[derive(Clone)]
pub struct DatabaseState {
    pub pool: SqlitePool,
}

/// Builds the full router over the given database state.
pub fn app(state: DatabaseState) -> Router {
    Router::new()
        .route("/bands", get(get_bands).post(create_band))
        .route("/bands/:id", get(get_band))
        .route("/bands/genre/:genre", get(get_bands_by_genre))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
