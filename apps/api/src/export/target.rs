//! Save targets: where a finished document goes once it is staged.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{info, warn};

use crate::export::ExportError;

/// What a save produced.
#[derive(Debug, Clone)]
pub enum Delivery {
    /// Bytes for the HTTP layer to hand to the client.
    Download(Bytes),
    /// Persisted copy on disk.
    Stored(PathBuf),
}

/// Carried by the export controller as `&dyn SaveTarget`; implement this to add
/// a destination without touching the controller.
#[async_trait]
pub trait SaveTarget: Send + Sync {
    fn name(&self) -> &'static str;

    /// Consumes the staged file at `staged`. Must not remove it; the controller
    /// owns its lifetime.
    async fn save(&self, staged: &Path, filename: &str) -> Result<Delivery, ExportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// DownloadTarget
// ────────────────────────────────────────────────────────────────────────────

/// Reads the staged bytes back so the response can carry them as an attachment.
pub struct DownloadTarget;

#[async_trait]
impl SaveTarget for DownloadTarget {
    fn name(&self) -> &'static str {
        "download"
    }

    async fn save(&self, staged: &Path, _filename: &str) -> Result<Delivery, ExportError> {
        let bytes = tokio::fs::read(staged)
            .await
            .map_err(|source| ExportError::Save {
                target: self.name(),
                source,
            })?;
        Ok(Delivery::Download(Bytes::from(bytes)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DirectoryTarget
// ────────────────────────────────────────────────────────────────────────────

/// Copies the staged file into an archive directory under its final name.
/// An existing file with the same name is overwritten.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    base_path: PathBuf,
}

impl DirectoryTarget {
    pub async fn new(base_path: PathBuf) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(&base_path).await?;
        info!(path = %base_path.display(), "archive directory ready");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl SaveTarget for DirectoryTarget {
    fn name(&self) -> &'static str {
        "directory"
    }

    /// `filename` must be a single plain component; anything that could
    /// resolve outside `base_path` is refused before touching the disk.
    async fn save(&self, staged: &Path, filename: &str) -> Result<Delivery, ExportError> {
        let mut components = Path::new(filename).components();
        let bare = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(name)), None) if name == OsStr::new(filename)
        );
        if !bare {
            warn!(filename = %filename, "rejected archive filename");
            return Err(ExportError::InvalidFilename(filename.to_string()));
        }

        let dest = self.base_path.join(filename);
        tokio::fs::copy(staged, &dest)
            .await
            .map_err(|source| ExportError::Save {
                target: self.name(),
                source,
            })?;
        Ok(Delivery::Stored(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_target_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("staged.pdf");
        tokio::fs::write(&staged, b"%PDF-1.7 body").await.unwrap();

        match DownloadTarget.save(&staged, "out.pdf").await.unwrap() {
            Delivery::Download(bytes) => assert_eq!(&bytes[..], b"%PDF-1.7 body"),
            other => panic!("unexpected delivery {other:?}"),
        }
        assert!(staged.exists(), "targets must leave the staged file alone");
    }

    #[tokio::test]
    async fn test_directory_target_copies_under_filename() {
        let staging = tempfile::tempdir().unwrap();
        let archive = tempfile::tempdir().unwrap();
        let staged = staging.path().join("staged.pdf");
        tokio::fs::write(&staged, b"%PDF-1.7").await.unwrap();

        let target = DirectoryTarget::new(archive.path().join("nested")).await.unwrap();
        match target.save(&staged, "cv.pdf").await.unwrap() {
            Delivery::Stored(path) => {
                assert_eq!(path, archive.path().join("nested").join("cv.pdf"));
                assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF-1.7");
            }
            other => panic!("unexpected delivery {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_target_refuses_paths() {
        let root = tempfile::tempdir().unwrap();
        let staged = root.path().join("staged.pdf");
        tokio::fs::write(&staged, b"%PDF-1.7").await.unwrap();
        let target = DirectoryTarget::new(root.path().join("archive")).await.unwrap();

        for filename in ["../escaped.pdf", "sub/cv.pdf", "/tmp/cv.pdf", "cv.pdf/.", "..", ""] {
            let err = target.save(&staged, filename).await.unwrap_err();
            assert!(
                matches!(err, ExportError::InvalidFilename(_)),
                "{filename:?} gave {err:?}"
            );
        }
        assert!(!root.path().join("escaped.pdf").exists());
        assert!(std::fs::read_dir(target.base_path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_missing_staged_file_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DownloadTarget
            .save(&dir.path().join("gone.pdf"), "x.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Save { target: "download", .. }));
    }
}
