//! Cryptographic Utilities
//!
//! Thin wrappers shared by the password and cipher modules: OS-backed
//! randomness, the two SHA digests in use, base64 text encoding and a
//! constant-time byte comparison.

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256, Sha512};

/// Cryptographically secure random bytes from the OS
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// SHA-256 digest (key derivation)
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-512 digest (password hashing)
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Bytes to base64 text (standard alphabet, padded)
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Base64 text back to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Compare two byte slices without short-circuiting on the first
/// difference. A length mismatch returns immediately: the length of a
/// stored digest is not a secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    // NIST test vectors for the empty message
    #[test]
    fn sha256_empty_message_vector() {
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(sha256(b"").to_vec(), expected);
    }

    #[test]
    fn sha512_empty_message_vector() {
        let expected = hex::decode(
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        )
        .unwrap();
        assert_eq!(sha512(b"").to_vec(), expected);
    }

    #[test]
    fn digests_are_deterministic_and_distinct() {
        assert_eq!(sha512(b"zuvopet"), sha512(b"zuvopet"));
        assert_ne!(sha512(b"zuvopet").to_vec(), sha512(b"zuvopet!").to_vec());
        assert_eq!(sha256(b"x").len(), 32);
        assert_eq!(sha512(b"x").len(), 64);
    }

    #[test]
    fn random_bytes_have_requested_length() {
        assert_eq!(random_bytes(0).len(), 0);
        assert_eq!(random_bytes(32).len(), 32);
        // Statistically never all zero
        assert!(random_bytes(32).iter().any(|&b| b != 0));
    }

    #[test]
    fn base64_roundtrip() {
        let data = random_bytes(48);
        assert_eq!(from_base64(&to_base64(&data)).unwrap(), data);
        assert!(from_base64("not valid base64!!").is_err());
    }

    #[test]
    fn constant_time_eq_semantics() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abcd", b"abc"));
        assert!(constant_time_eq(b"", b""));
    }
}
