//! Error taxonomy for the transform pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the pipeline core.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Every failure a pipeline run can surface.
///
/// One error kind per run, always terminal: the pipeline never retries
/// internally, never downgrades a failure to success, and never leaves
/// fallback output behind. The caller may re-issue the whole request.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Malformed request: bad direction flag, oversized path or undersized key.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The file's confirmation tag was not produced by the supplied key.
    #[error("key does not match the file's confirmation tag")]
    KeyMismatch,

    /// Two roles in the transform resolve to the same underlying file.
    #[error("source and destination are the same file: {0}")]
    SelfTransform(PathBuf),

    /// Storage failure: open, read, write, rename or unlink. Also covers
    /// permission faults and non-regular source files.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The cipher or digest primitive rejected its inputs.
    #[error("cipher failure: {0}")]
    Cipher(String),
}

impl TransformError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}
