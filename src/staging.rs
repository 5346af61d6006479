//! Stage-then-commit output installation.
//!
//! Output is written to a temporary file in the destination's directory and
//! becomes visible only through a single atomic rename. An uncommitted
//! artifact deletes its temporary file when dropped, so every early return
//! in the pipeline rolls back without any per-call-site cleanup code.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::file::operations::is_same_file;

/// A not-yet-visible output file.
///
/// Exactly one of [`commit`](Self::commit) or rollback (explicit or via
/// drop) happens per artifact - never both, never neither.
pub struct StagingArtifact {
    file: Option<NamedTempFile>,
    dest: PathBuf,
}

impl StagingArtifact {
    /// Creates the staging file alongside the destination so the final
    /// rename never crosses a filesystem boundary.
    pub fn begin(dest: &Path) -> Result<Self> {
        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let file = Builder::new()
            .prefix(".xcr-staging-")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| TransformError::io(format!("failed to create staging file in {}", dir.display()), e))?;

        debug!(staging = %file.path().display(), "staging artifact created");
        Ok(Self { file: Some(file), dest: dest.to_path_buf() })
    }

    /// Appends bytes to the staged output.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let file = self.file.as_mut().ok_or_else(|| {
            TransformError::io("staging artifact already released".to_string(), io::Error::new(io::ErrorKind::NotFound, "no staging file"))
        })?;

        file.write_all(bytes).map_err(|e| TransformError::io("failed to write staging file", e))
    }

    /// Installs the staged bytes at the destination.
    ///
    /// Refuses when staging and destination already resolve to the same
    /// file; otherwise one rename either fully replaces the destination or
    /// fails leaving it untouched.
    pub fn commit(mut self) -> Result<()> {
        let file = self.file.take().ok_or_else(|| {
            TransformError::io("staging artifact already released".to_string(), io::Error::new(io::ErrorKind::NotFound, "no staging file"))
        })?;

        file.as_file().sync_all().map_err(|e| TransformError::io("failed to flush staging file", e))?;

        if is_same_file(file.path(), &self.dest) {
            // Dropping `file` here unlinks it, which would destroy the
            // destination if they really are one file. Refuse instead.
            let (_, path) = file.keep().map_err(|e| TransformError::io("failed to preserve staging file", e.error))?;
            debug!(staging = %path.display(), "refusing commit onto the staging file itself");
            return Err(TransformError::SelfTransform(self.dest.clone()));
        }

        file.persist(&self.dest).map_err(|e| TransformError::io(format!("failed to install {}", self.dest.display()), e.error))?;

        debug!(dest = %self.dest.display(), "staged output committed");
        Ok(())
    }

    /// Deletes the staging file. Idempotent; also runs on drop.
    pub fn rollback(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            if let Err(e) = file.close() {
                debug!(staging = %path.display(), error = %e, "failed to remove staging file");
            } else {
                debug!(staging = %path.display(), "staging artifact rolled back");
            }
        }
    }
}

impl Drop for StagingArtifact {
    fn drop(&mut self) {
        self.rollback();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_commit_installs_exact_bytes() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.bin");

        let mut staging = StagingArtifact::begin(&dest).unwrap();
        staging.append(b"hello ").unwrap();
        staging.append(b"world").unwrap();
        staging.commit().unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"hello world");
        // Only the destination remains, the staging file is gone.
        assert_eq!(entries(dir.path()), 1);
    }

    #[test]
    fn test_commit_replaces_existing_destination() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        fs::write(&dest, b"old contents").unwrap();

        let mut staging = StagingArtifact::begin(&dest).unwrap();
        staging.append(b"new").unwrap();
        staging.commit().unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
        assert_eq!(entries(dir.path()), 1);
    }

    #[test]
    fn test_drop_removes_uncommitted_staging() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.bin");

        {
            let mut staging = StagingArtifact::begin(&dest).unwrap();
            staging.append(b"partial output").unwrap();
        }

        assert!(!dest.exists());
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn test_rollback_is_idempotent() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.bin");

        let mut staging = StagingArtifact::begin(&dest).unwrap();
        staging.rollback();
        staging.rollback();
        drop(staging);

        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn test_append_after_rollback_fails() {
        let dir = tempdir().unwrap();
        let mut staging = StagingArtifact::begin(&dir.path().join("out.bin")).unwrap();
        staging.rollback();

        assert!(matches!(staging.append(b"late"), Err(TransformError::Io { .. })));
    }
}
