use std::sync::Arc;

use crate::config::Config;
use crate::export::{DirectoryTarget, Exporter};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Backend plus the default render profile from `RENDER_PROFILE`.
    pub exporter: Exporter,
    /// Present only when `ARCHIVE_DIR` is configured.
    pub archive: Option<Arc<DirectoryTarget>>,
}
