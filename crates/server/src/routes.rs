//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit =
        usize::try_from(state.config.limits.max_upload_bytes).unwrap_or(usize::MAX);

    Router::new()
        .route("/convert-to-pwa", post(handlers::convert_to_pwa))
        .route("/v1/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
