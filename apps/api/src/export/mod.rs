//! Export controller: typed résumé in, saved document out.
//!
//! Flow: stage a temp file → build + lay out + produce bytes into it on the
//! blocking pool → hand it to a `SaveTarget` → release the staged file. The
//! staged file is released on every exit path, including backend failures.
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::build;
use crate::layout::{render, RenderProfile};
use crate::models::ResumeDocument;
use crate::render::{DocumentBackend, RenderError};

pub mod filename;
pub mod staging;
pub mod target;

pub use filename::{derive_filename_today, normalize_filename};
pub use staging::StagedDocument;
pub use target::{Delivery, DirectoryTarget, DownloadTarget, SaveTarget};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Could not stage output: {0}")]
    Staging(#[source] std::io::Error),

    #[error("Save to {target} failed: {source}")]
    Save {
        target: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to save under {0:?}: not a bare file name")]
    InvalidFilename(String),

    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Outcome of one export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub id: Uuid,
    pub filename: String,
    pub bytes: u64,
    pub target: &'static str,
    #[serde(skip)]
    pub delivery: Delivery,
}

#[derive(Clone)]
pub struct Exporter {
    backend: Arc<dyn DocumentBackend>,
    profile: Arc<RenderProfile>,
    /// Where staged files live; `None` uses the system temp dir.
    staging_dir: Option<PathBuf>,
}

impl Exporter {
    pub fn new(backend: Arc<dyn DocumentBackend>, profile: RenderProfile) -> Self {
        Self {
            backend,
            profile: Arc::new(profile),
            staging_dir: None,
        }
    }

    pub fn with_staging_dir(mut self, dir: PathBuf) -> Self {
        self.staging_dir = Some(dir);
        self
    }

    /// Same backend and staging, different profile.
    pub fn with_profile(&self, profile: RenderProfile) -> Self {
        Self {
            profile: Arc::new(profile),
            ..self.clone()
        }
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }

    pub fn content_type(&self) -> &'static str {
        self.backend.content_type()
    }

    /// Renders `doc` to bytes in memory, without staging or saving.
    pub async fn render_bytes(&self, doc: &ResumeDocument) -> Result<Vec<u8>, ExportError> {
        let doc = doc.clone();
        let backend = Arc::clone(&self.backend);
        let profile = Arc::clone(&self.profile);

        let bytes = tokio::task::spawn_blocking(move || {
            let instructions = render(&build(&doc), &profile);
            backend.produce_vec(&instructions)
        })
        .await??;
        Ok(bytes)
    }

    /// Produces the document and saves it through `target`, under `filename`
    /// when one is supplied (reduced to a bare `*.pdf` name) or the derived
    /// name otherwise.
    pub async fn export_document(
        &self,
        doc: &ResumeDocument,
        filename: Option<&str>,
        target: &dyn SaveTarget,
    ) -> Result<ExportReceipt, ExportError> {
        let id = Uuid::new_v4();
        let filename = filename
            .and_then(normalize_filename)
            .unwrap_or_else(|| derive_filename_today(doc));

        let staged =
            StagedDocument::create(self.staging_dir.as_deref()).map_err(ExportError::Staging)?;

        // The staged file moves into the blocking task and comes back on
        // success; on failure it is dropped there, which removes it.
        let staged = self.produce_into(doc, staged).await.inspect_err(|e| {
            warn!(export_id = %id, backend = self.backend.name(), error = %e, "export render failed");
        })?;

        let saved = match staged.len() {
            Ok(bytes) => target
                .save(staged.path(), &filename)
                .await
                .map(|delivery| (delivery, bytes)),
            Err(e) => Err(ExportError::Staging(e)),
        };
        staged.release();

        let (delivery, bytes) = saved.inspect_err(|e| {
            warn!(export_id = %id, target = target.name(), error = %e, "export save failed");
        })?;

        info!(
            export_id = %id,
            filename = %filename,
            bytes,
            target = target.name(),
            "export complete"
        );
        Ok(ExportReceipt {
            id,
            filename,
            bytes,
            target: target.name(),
            delivery,
        })
    }

    async fn produce_into(
        &self,
        doc: &ResumeDocument,
        mut staged: StagedDocument,
    ) -> Result<StagedDocument, ExportError> {
        let doc = doc.clone();
        let backend = Arc::clone(&self.backend);
        let profile = Arc::clone(&self.profile);

        tokio::task::spawn_blocking(move || {
            let instructions = render(&build(&doc), &profile);
            backend.produce(&instructions, staged.file_mut())?;
            staged.file_mut().sync_all().map_err(RenderError::Io)?;
            Ok::<_, RenderError>(staged)
        })
        .await?
        .map_err(ExportError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DrawInstructions;
    use crate::render::PdfBackend;
    use crate::sample::SAMPLE_JSON;
    use crate::validation::validate;
    use async_trait::async_trait;
    use std::io::Write;
    use std::path::Path;

    struct FailingBackend;

    impl DocumentBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn content_type(&self) -> &'static str {
            "application/pdf"
        }

        fn produce(
            &self,
            _instructions: &DrawInstructions,
            out: &mut dyn Write,
        ) -> Result<(), RenderError> {
            out.write_all(b"%PDF-partial")?;
            Err(RenderError::Io(std::io::Error::other("backend exploded")))
        }
    }

    struct FailingTarget;

    #[async_trait]
    impl SaveTarget for FailingTarget {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn save(&self, staged: &Path, _filename: &str) -> Result<Delivery, ExportError> {
            assert!(staged.exists(), "staged file must exist while saving");
            Err(ExportError::Save {
                target: self.name(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn sample() -> ResumeDocument {
        validate(SAMPLE_JSON).unwrap()
    }

    fn exporter(backend: Arc<dyn DocumentBackend>, staging: &Path) -> Exporter {
        Exporter::new(backend, RenderProfile::compact()).with_staging_dir(staging.to_path_buf())
    }

    fn is_empty_dir(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_download_export_releases_staged_file() {
        let staging = tempfile::tempdir().unwrap();
        let exporter = exporter(Arc::new(PdfBackend::new()), staging.path());

        let receipt = exporter
            .export_document(&sample(), None, &DownloadTarget)
            .await
            .unwrap();

        assert!(is_empty_dir(staging.path()));
        assert!(receipt.filename.starts_with("Maya-Lindqvist_Backend-Engineer_Resume_"));
        assert_eq!(receipt.target, "download");
        match receipt.delivery {
            Delivery::Download(bytes) => {
                assert!(bytes.starts_with(b"%PDF-"));
                assert_eq!(bytes.len() as u64, receipt.bytes);
            }
            other => panic!("unexpected delivery {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_backend_failure_releases_staged_file() {
        let staging = tempfile::tempdir().unwrap();
        let exporter = exporter(Arc::new(FailingBackend), staging.path());

        let err = exporter
            .export_document(&sample(), None, &DownloadTarget)
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Render(RenderError::Io(_))));
        assert!(is_empty_dir(staging.path()));
    }

    #[tokio::test]
    async fn test_save_failure_releases_staged_file() {
        let staging = tempfile::tempdir().unwrap();
        let exporter = exporter(Arc::new(PdfBackend::new()), staging.path());

        let err = exporter
            .export_document(&sample(), Some("cv"), &FailingTarget)
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Save { target: "failing", .. }));
        assert!(is_empty_dir(staging.path()));
    }

    #[tokio::test]
    async fn test_directory_export_uses_supplied_filename() {
        let staging = tempfile::tempdir().unwrap();
        let archive = tempfile::tempdir().unwrap();
        let exporter = exporter(Arc::new(PdfBackend::new()), staging.path());
        let target = DirectoryTarget::new(archive.path().to_path_buf()).await.unwrap();

        let receipt = exporter
            .export_document(&sample(), Some("../secret/maya"), &target)
            .await
            .unwrap();

        assert_eq!(receipt.filename, "maya.pdf");
        let stored = archive.path().join("maya.pdf");
        assert!(matches!(&receipt.delivery, Delivery::Stored(p) if *p == stored));
        let bytes = std::fs::read(&stored).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(bytes.len() as u64, receipt.bytes);
        assert!(is_empty_dir(staging.path()));
    }

    #[tokio::test]
    async fn test_derived_filename_stays_inside_archive() {
        let staging = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let exporter = exporter(Arc::new(PdfBackend::new()), staging.path());
        let target = DirectoryTarget::new(root.path().join("archive")).await.unwrap();

        let mut doc = sample();
        doc.header.full_name = "../escaped".to_string();
        doc.header.headline = Some("Backend/Infra Engineer".to_string());
        let receipt = exporter.export_document(&doc, None, &target).await.unwrap();

        assert!(receipt.filename.starts_with("..-escaped_Backend-Infra-Engineer_Resume_"));
        let stored = root.path().join("archive").join(&receipt.filename);
        assert!(matches!(&receipt.delivery, Delivery::Stored(p) if *p == stored));
        assert!(stored.is_file());
        let beside: Vec<_> = std::fs::read_dir(root.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(beside, vec![std::ffi::OsString::from("archive")]);
    }

    #[tokio::test]
    async fn test_render_bytes_matches_profile() {
        let exporter = Exporter::new(Arc::new(PdfBackend::new()), RenderProfile::compact());
        let compact = exporter.render_bytes(&sample()).await.unwrap();
        let spacious = exporter
            .with_profile(RenderProfile::spacious())
            .render_bytes(&sample())
            .await
            .unwrap();
        assert!(compact.starts_with(b"%PDF-"));
        assert!(spacious.starts_with(b"%PDF-"));
        assert_ne!(compact, spacious);
        assert_eq!(exporter.profile().kind, crate::layout::ProfileKind::Compact);
    }
}
