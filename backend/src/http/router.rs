//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the front-end is served from a different origin in development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/dashboard/filters", post(handlers::apply_filters))
        .route("/dashboard/sort", post(handlers::sort_dashboard))
        .route("/dashboard/reset", post(handlers::reset_dashboard))
        .route("/dashboard/table.html", get(handlers::get_table_html))
        .route("/filter-options", get(handlers::get_filter_options))
        .route("/theme", get(handlers::get_theme).put(handlers::put_theme));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
