use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Analysis
        .route("/analyze", post(handlers::analyze))
        // Voice capture
        .route("/capture/toggle", post(handlers::toggle_capture))
        .route("/capture/stop", post(handlers::stop_capture))
        .route("/capture/status", get(handlers::capture_status))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
