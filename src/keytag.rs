//! Key-confirmation tag.
//!
//! An MD5 digest of the raw key, stored as the first 16 bytes of every
//! encrypted file. It detects wrong-key decryption attempts before any
//! output is staged. It authenticates only the key, never the payload.

use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

use crate::config::TAG_SIZE;

/// Computes the 16-byte confirmation tag for a key.
///
/// Deterministic and unsalted: both sides must derive the identical
/// preamble from the key bytes alone.
#[must_use]
pub fn compute_tag(key: &[u8]) -> [u8; TAG_SIZE] {
    Md5::digest(key).into()
}

/// Compares a preamble read from a file against the expected tag in
/// constant time.
#[must_use]
pub fn verify_tag(expected: &[u8; TAG_SIZE], found: &[u8]) -> bool {
    expected.as_slice().ct_eq(found).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_deterministic() {
        let key = b"thisisasecretkey12345";
        assert_eq!(compute_tag(key), compute_tag(key));
    }

    #[test]
    fn test_known_tag_value() {
        // md5("thisisasecretkey12345")
        let expected = hex::decode("123774ff778ae0f42f7f3a13def0ac82").unwrap();
        assert_eq!(compute_tag(b"thisisasecretkey12345").as_slice(), expected.as_slice());
    }

    #[test]
    fn test_different_keys_differ() {
        assert_ne!(compute_tag(b"thisisasecretkey12345"), compute_tag(b"differentkeydifferentkey"));
    }

    #[test]
    fn test_verify_accepts_matching_preamble() {
        let tag = compute_tag(b"0123456789abcdef");
        assert!(verify_tag(&tag, &tag));
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let tag = compute_tag(b"0123456789abcdef");
        let mut tampered = tag;
        tampered[0] ^= 0xff;
        assert!(!verify_tag(&tag, &tampered));
    }

    #[test]
    fn test_verify_rejects_short_preamble() {
        let tag = compute_tag(b"0123456789abcdef");
        assert!(!verify_tag(&tag, &tag[..8]));
    }
}
