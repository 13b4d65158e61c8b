//! Staged output: the temporary file that holds rendered bytes until a save
//! target has consumed them.
//!
//! The file is removed by `release()` or, on any early exit, when the value is
//! dropped.

use std::fs::File;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub struct StagedDocument {
    file: NamedTempFile,
}

impl StagedDocument {
    /// Creates an empty staged file in `dir`, or the system temp dir.
    pub fn create(dir: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-press-").suffix(".pdf");
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        debug!(path = %file.path().display(), "staged file created");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file_mut(&mut self) -> &mut File {
        self.file.as_file_mut()
    }

    pub fn len(&self) -> io::Result<u64> {
        Ok(self.file.as_file().metadata()?.len())
    }

    /// Deletes the staged file. Failure is logged, never propagated: the save
    /// outcome is what the caller reports.
    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!(path = %path.display(), "staged file released"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove staged file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_release_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut staged = StagedDocument::create(Some(dir.path())).unwrap();
        staged.file_mut().write_all(b"%PDF-1.7").unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(staged.len().unwrap(), 8);

        staged.release();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let staged = StagedDocument::create(Some(dir.path())).unwrap();
            staged.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_staged_name_shape() {
        let staged = StagedDocument::create(None).unwrap();
        let name = staged.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("resume-press-"));
        assert!(name.ends_with(".pdf"));
    }
}
