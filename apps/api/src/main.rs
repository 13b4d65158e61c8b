mod config;
mod document;
mod errors;
mod export;
mod layout;
mod models;
mod render;
mod routes;
mod sample;
mod state;
mod validation;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::{DirectoryTarget, Exporter};
use crate::layout::RenderProfile;
use crate::render::{DocumentBackend, PdfBackend};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-press v{}", env!("CARGO_PKG_VERSION"));

    let backend = Arc::new(PdfBackend::new());
    let profile = RenderProfile::for_kind(config.render_profile);
    info!(
        backend = backend.name(),
        profile = %profile.kind,
        "Render pipeline ready ({}x{}pt page)",
        profile.page.width,
        profile.page.height
    );
    let mut exporter = Exporter::new(backend, profile);
    if let Some(dir) = &config.staging_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to prepare STAGING_DIR {}", dir.display()))?;
        info!("Staging exports in {}", dir.display());
        exporter = exporter.with_staging_dir(dir.clone());
    }

    let archive = match &config.archive_dir {
        Some(dir) => {
            let target = DirectoryTarget::new(dir.clone())
                .await
                .with_context(|| format!("failed to prepare ARCHIVE_DIR {}", dir.display()))?;
            info!("Archive enabled at {}", target.base_path().display());
            Some(Arc::new(target))
        }
        None => None,
    };

    let state = AppState {
        config: config.clone(),
        exporter,
        archive,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
