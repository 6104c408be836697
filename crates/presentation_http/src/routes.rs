//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use infrastructure::ServerConfig;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// Upload routes accept bodies up to `max_upload_bytes`, the JSON route up
/// to `max_body_size_json_bytes`.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let uploads = Router::new()
        .route("/v1/lab-report", post(handlers::analysis::lab_report))
        .route("/v1/prescription", post(handlers::analysis::prescription))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes));

    let json = Router::new()
        .route("/v1/diagnose", post(handlers::analysis::diagnose))
        .layer(DefaultBodyLimit::max(server.max_body_size_json_bytes));

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Analysis API (v1)
        .merge(uploads)
        .merge(json)
        .with_state(state)
}
