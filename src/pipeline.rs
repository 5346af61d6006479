//! End-to-end transform pipeline.
//!
//! One instance per request, single-use, strictly sequential:
//! validate -> open source -> key-tag phase -> stream chunks -> commit.
//! Any fault unwinds through ownership - the staging artifact deletes
//! itself when dropped uncommitted and handles close in reverse
//! acquisition order - so the destination never observes partial content.

use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::cipher::ChunkCipher;
use crate::config::{TAG_SIZE, TRANSFER_UNIT};
use crate::error::{Result, TransformError};
use crate::file::operations::{is_same_file, open_source};
use crate::keytag::{compute_tag, verify_tag};
use crate::secret::SecretBytes;
use crate::staging::StagingArtifact;
use crate::types::{Direction, TransformOutcome, TransformRequest};
use crate::ui::progress::Bar;

/// Encrypts `source` into `dest` with the given key.
pub fn encrypt(source: &Path, dest: &Path, key: &[u8]) -> Result<TransformOutcome> {
    run(TransformRequest::new(source.to_path_buf(), dest.to_path_buf(), SecretBytes::new(key), Direction::Encrypt))
}

/// Decrypts `source` into `dest` with the given key.
pub fn decrypt(source: &Path, dest: &Path, key: &[u8]) -> Result<TransformOutcome> {
    run(TransformRequest::new(source.to_path_buf(), dest.to_path_buf(), SecretBytes::new(key), Direction::Decrypt))
}

/// Runs one transform to completion.
///
/// Consumes the request: one request, one run, one outcome. Either the
/// destination ends up containing exactly the transformed bytes, or it is
/// left as it was before the call and no staging file remains.
pub fn run(request: TransformRequest) -> Result<TransformOutcome> {
    request.validate()?;

    let (mut source, source_len) = open_source(request.source_path())?;
    debug!(
        source = %request.source_path().display(),
        dest = %request.dest_path().display(),
        len = source_len,
        direction = %request.direction(),
        "source opened"
    );

    // Transforming a file onto itself would clobber the source at commit
    // time; refuse before anything is staged.
    if is_same_file(request.source_path(), request.dest_path()) {
        return Err(TransformError::SelfTransform(request.dest_path().to_path_buf()));
    }

    let cipher = ChunkCipher::new(request.key())?;
    let tag = compute_tag(request.key());

    let mut bytes_read = 0u64;
    let mut bytes_written = 0u64;

    // Decrypt verifies the preamble before the staging artifact exists: a
    // wrong key must leave no trace on disk.
    if request.direction() == Direction::Decrypt {
        let mut preamble = [0u8; TAG_SIZE];
        source.read_exact(&mut preamble).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => {
                TransformError::io(format!("source shorter than the {TAG_SIZE}-byte confirmation tag: {}", request.source_path().display()), e)
            }
            _ => TransformError::io("failed to read confirmation tag", e),
        })?;
        bytes_read += TAG_SIZE as u64;

        if !verify_tag(&tag, &preamble) {
            debug!(expected = %hex::encode(tag), found = %hex::encode(preamble), "confirmation tag mismatch");
            return Err(TransformError::KeyMismatch);
        }
    }

    let mut staging = StagingArtifact::begin(request.dest_path())?;

    if request.direction() == Direction::Encrypt {
        staging.append(&tag)?;
        bytes_written += TAG_SIZE as u64;
    }

    let progress = Bar::new(source_len, request.direction().progress_label());
    let mut buffer = vec![0u8; TRANSFER_UNIT];

    loop {
        let n = read_chunk(&mut source, &mut buffer).map_err(|e| TransformError::io("failed to read source", e))?;
        if n == 0 {
            break;
        }
        bytes_read += n as u64;

        let transformed = cipher.transform_chunk(&buffer[..n])?;
        staging.append(&transformed)?;
        bytes_written += transformed.len() as u64;

        progress.add(n as u64);
    }

    // Re-check at commit time: the destination may have appeared (or been
    // relinked) while streaming.
    if is_same_file(request.source_path(), request.dest_path()) {
        return Err(TransformError::SelfTransform(request.dest_path().to_path_buf()));
    }

    staging.commit()?;
    progress.finish();

    info!(
        source = %request.source_path().display(),
        dest = %request.dest_path().display(),
        bytes_read,
        bytes_written,
        "transform committed"
    );

    Ok(TransformOutcome { bytes_read, bytes_written })
}

/// Fills the buffer from the reader, short only at end of input.
///
/// Chunk boundaries are format-relevant (the keystream restarts at each
/// one), so a partial read mid-file must not produce a short chunk.
fn read_chunk<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
