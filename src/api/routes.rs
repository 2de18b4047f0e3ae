use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::state::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog metadata for the preferences form
        .route("/catalog/genres", get(handlers::get_genres))
        .route("/catalog/buckets", get(handlers::get_buckets))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:id", get(handlers::get_session))
        // Comparison rounds
        .route("/sessions/:id/pair", get(handlers::get_pair))
        .route("/sessions/:id/choices", post(handlers::post_choice))
        // Recommendations
        .route(
            "/sessions/:id/recommendations",
            get(handlers::get_recommendations),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
