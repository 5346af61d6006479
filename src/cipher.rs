//! AES-128-CTR chunk transform.
//!
//! Every chunk is transformed with the counter reset to the same fixed
//! constant ([`CHUNK_IV`]). Encryption and decryption are inverse only
//! because both sides restart the keystream at every chunk boundary. Files
//! written by the original tool depend on this behavior byte-for-byte, so
//! it is preserved exactly; it is not a secure construction for new
//! formats, since every chunk of every file shares one keystream.

use aes::Aes128;
use ctr::Ctr128BE;
use ctr::cipher::{KeyIvInit, StreamCipher};

use crate::config::{CHUNK_IV, CIPHER_KEY_SIZE};
use crate::error::{Result, TransformError};

type Aes128Ctr = Ctr128BE<Aes128>;

/// Stream-cipher context for one pipeline run.
///
/// Holds only the key; the per-chunk cipher state is rebuilt on every call
/// so each chunk sees a fresh counter.
pub struct ChunkCipher {
    key: [u8; CIPHER_KEY_SIZE],
}

impl ChunkCipher {
    /// Builds a cipher from the caller's key.
    ///
    /// Only the first 16 bytes feed AES-128; the rest of the key
    /// participates in the confirmation tag alone.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key: [u8; CIPHER_KEY_SIZE] = key
            .get(..CIPHER_KEY_SIZE)
            .and_then(|k| k.try_into().ok())
            .ok_or_else(|| TransformError::Cipher(format!("key must be at least {CIPHER_KEY_SIZE} bytes")))?;

        Ok(Self { key })
    }

    /// Transforms one chunk; output length always equals input length.
    ///
    /// CTR mode is its own inverse, so the same call serves both
    /// directions.
    pub fn transform_chunk(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut cipher = Aes128Ctr::new_from_slices(&self.key, &CHUNK_IV).map_err(|e| TransformError::Cipher(e.to_string()))?;

        let mut output = input.to_vec();
        cipher.apply_keystream(&mut output);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"thisisasecretkey12345";

    #[test]
    fn test_rejects_short_key() {
        assert!(matches!(ChunkCipher::new(b"short"), Err(TransformError::Cipher(_))));
    }

    #[test]
    fn test_length_is_preserved() {
        let cipher = ChunkCipher::new(KEY).unwrap();
        for len in [0usize, 1, 15, 16, 17, 4096, 5000] {
            let input = vec![0xabu8; len];
            assert_eq!(cipher.transform_chunk(&input).unwrap().len(), len);
        }
    }

    #[test]
    fn test_roundtrip() {
        let cipher = ChunkCipher::new(KEY).unwrap();
        let plaintext = b"The quick brown fox jumps over the lazy dog".to_vec();

        let ciphertext = cipher.transform_chunk(&plaintext).unwrap();
        assert_ne!(ciphertext, plaintext);

        let recovered = cipher.transform_chunk(&ciphertext).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn test_chunks_share_the_reset_keystream() {
        // The format resets the counter per chunk, so transforming the same
        // bytes as two separate chunks must give two identical outputs.
        let cipher = ChunkCipher::new(KEY).unwrap();
        let chunk = vec![0x5au8; 4096];

        let first = cipher.transform_chunk(&chunk).unwrap();
        let second = cipher.transform_chunk(&chunk).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_first_sixteen_key_bytes_feed_the_cipher() {
        let a = ChunkCipher::new(b"0123456789abcdefTAIL-ONE").unwrap();
        let b = ChunkCipher::new(b"0123456789abcdefTAIL-TWO").unwrap();

        let input = b"same plaintext".to_vec();
        assert_eq!(a.transform_chunk(&input).unwrap(), b.transform_chunk(&input).unwrap());
    }
}
