pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/results", get(handlers::handle_list_results))
        .route(
            "/api/v1/results/:filename",
            get(handlers::handle_get_result),
        )
        .route("/api/v1/rescore", post(handlers::handle_rescore))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
