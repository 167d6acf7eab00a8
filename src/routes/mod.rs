use axum::{
    routing::{delete, get},
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

pub mod health;
pub mod items;

/// Builds the application router over the shared pool.
pub fn router(pool: SqlitePool) -> Router {
    // Any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Router::new()
        .route("/", get(|| async { "Items API - v1.0" }))
        .route("/health", get(health::health_check))
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/{id}", delete(items::delete_item))
        .fallback(|| async { not_found() })
        .layer(middleware)
        .with_state(pool)
}

pub(crate) fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
