//! Global configuration constants.
//!
//! Everything here is part of the on-disk format or the request contract.
//! Changing `CHUNK_IV`, `TAG_SIZE` or `TRANSFER_UNIT` makes every previously
//! written file undecryptable.

/// Application name used in user-facing output.
pub const APP_NAME: &str = "xcrypt";

/// File extension appended to encrypted files when no output path is given.
pub const FILE_EXTENSION: &str = ".xcr";

/// Size of the key-confirmation tag stored as the file preamble, in bytes.
///
/// Equal to both the MD5 digest size and the AES block size, which is why
/// the original format picked 16.
pub const TAG_SIZE: usize = 16;

/// AES-128 key size in bytes.
///
/// Only the first `CIPHER_KEY_SIZE` bytes of the caller's key feed the
/// cipher; the full key feeds the confirmation tag.
pub const CIPHER_KEY_SIZE: usize = 16;

/// Minimum accepted key length in bytes.
pub const MIN_KEY_LEN: usize = 16;

/// Initialization vector applied to every chunk transform.
///
/// The format resets the counter to this exact constant at each chunk
/// boundary. Existing files depend on it byte-for-byte, so it must never
/// change. This IV reuse is not a secure construction for new formats.
pub const CHUNK_IV: [u8; 16] = *b"xcryptfixedivval";

/// Transfer unit: bytes read, transformed and staged per streaming cycle.
///
/// Chunk boundaries are format-relevant because the keystream restarts at
/// each one; both directions must use the same unit.
pub const TRANSFER_UNIT: usize = 4096;

/// Maximum accepted path length in bytes (Linux `PATH_MAX`).
pub const MAX_PATH_BYTES: usize = 4096;
