pub mod health;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/sample", get(resume::handle_sample))
        .route("/api/v1/resume/validate", post(resume::handle_validate))
        .route("/api/v1/resume/layout", post(resume::handle_layout))
        .route("/api/v1/resume/preview", post(resume::handle_preview))
        .route("/api/v1/resume/export", post(resume::handle_export))
        .route("/api/v1/resume/archive", post(resume::handle_archive))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
