use axum::{extract::State, Json};
use serde::Serialize;

use crate::layout::ProfileKind;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Profile used when a request does not pick one.
    pub default_profile: ProfileKind,
    pub archive_enabled: bool,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        default_profile: state.exporter.profile().kind,
        archive_enabled: state.archive.is_some(),
    })
}
