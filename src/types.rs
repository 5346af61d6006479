//! Core request and outcome types.
//!
//! A [`TransformRequest`] is immutable once constructed and owned by exactly
//! one pipeline run. [`Direction`] mirrors the raw request flag consumed from
//! the validation collaborator (0 = decrypt, 1 = encrypt).

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::error::TransformError;
use crate::file::validation::{validate_key, validate_path};
use crate::secret::SecretBytes;

/// The direction of a file transform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    /// Array containing both directions for iteration.
    pub const ALL: &'static [Self] = &[Self::Encrypt, Self::Decrypt];

    /// Returns a human-readable label for the direction.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypt",
            Self::Decrypt => "Decrypt",
        }
    }

    /// Returns a progress label for an operation in flight.
    #[inline]
    pub fn progress_label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypting...",
            Self::Decrypt => "Decrypting...",
        }
    }
}

impl Display for Direction {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Direction {
    type Error = TransformError;

    /// Maps the wire flag: 0 = decrypt, 1 = encrypt, anything else is a
    /// validation failure.
    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(Self::Decrypt),
            1 => Ok(Self::Encrypt),
            other => Err(TransformError::Validation(format!("direction flag must be 0 or 1, got {other}"))),
        }
    }
}

/// A validated-shape request for one whole-file transform.
pub struct TransformRequest {
    source_path: PathBuf,
    dest_path: PathBuf,
    key: SecretBytes,
    direction: Direction,
}

impl TransformRequest {
    pub fn new(source_path: PathBuf, dest_path: PathBuf, key: SecretBytes, direction: Direction) -> Self {
        Self { source_path, dest_path, key, direction }
    }

    #[inline]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    #[inline]
    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }

    #[inline]
    pub fn key(&self) -> &[u8] {
        self.key.expose_secret()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Checks the request invariants: key length and path lengths. Storage
    /// faults (missing source, permissions) surface later as `Io`.
    pub fn validate(&self) -> Result<(), TransformError> {
        validate_key(self.key.expose_secret())?;
        validate_path(&self.source_path)?;
        validate_path(&self.dest_path)?;
        Ok(())
    }
}

/// Byte counts for a completed transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformOutcome {
    /// Bytes consumed from the source, preamble included on decrypt.
    pub bytes_read: u64,

    /// Bytes installed at the destination, preamble included on encrypt.
    pub bytes_written: u64,
}
