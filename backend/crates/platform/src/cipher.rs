//! Payload Encryption
//!
//! Symmetric encryption for the identity payload carried inside bearer
//! tokens, so the backend needs no server-side session store.
//!
//! The AES-256 key is derived by hashing `secret + salt` with SHA-256
//! `iterations` times over its own output. Encryption is AES-256-CBC with
//! PKCS#7 padding and a fixed all-zero IV: the same plaintext under the
//! same key always yields the same ciphertext. This keeps already-issued
//! tokens decryptable across deployments. It also means equal payloads are
//! distinguishable on the wire and there is no integrity tag; see
//! DESIGN.md for the recorded migration path to AES-GCM.

use aes::Aes256;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::{Engine, engine::general_purpose};
use thiserror::Error;

use crate::crypto::sha256;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes
const BLOCK_SIZE: usize = 16;

/// Fixed IV. Required for deterministic ciphertext; not a secret.
const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

/// Decryption failure classification
///
/// Hostile or corrupted input is an `Err`, never a panic and never a
/// silently-empty plaintext.
#[derive(Debug, Error)]
pub enum DecryptError {
    /// Input is not valid base64
    #[error("Ciphertext is not valid base64")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Decoded length is not a whole number of cipher blocks
    #[error("Ciphertext length {len} is not a multiple of the block size")]
    InvalidLength { len: usize },

    /// Block decryption produced invalid PKCS#7 padding
    #[error("Ciphertext has invalid padding")]
    InvalidPadding,

    /// Decrypted bytes are not valid UTF-8
    #[error("Decrypted payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Symmetric cipher for short serialized identity payloads
///
/// The key is derived once at construction from the process-wide
/// configuration and is immutable afterwards. The cipher is cheap to
/// clone and safe to share across request handlers.
#[derive(Clone)]
pub struct PayloadCipher {
    key: [u8; 32],
}

impl PayloadCipher {
    /// Derive the AES-256 key from the shared secret, derivation salt and
    /// iteration count
    ///
    /// The same parameters must be used for encryption and decryption or
    /// every issued token becomes unreadable. At least one hash round is
    /// always applied so the key is always a full SHA-256 block.
    pub fn new(secret: &str, salt: &str, iterations: u32) -> Self {
        let mut material = Vec::with_capacity(secret.len() + salt.len());
        material.extend_from_slice(secret.as_bytes());
        material.extend_from_slice(salt.as_bytes());

        let mut key = sha256(&material);
        for _ in 1..iterations.max(1) {
            key = sha256(&key);
        }

        Self { key }
    }

    /// Encrypt a plaintext string, returning base64 ciphertext
    ///
    /// Deterministic: the same plaintext under the same key always yields
    /// the same ciphertext (fixed IV).
    pub fn encrypt(&self, plaintext: &str) -> String {
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &ZERO_IV.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        general_purpose::STANDARD.encode(ciphertext)
    }

    /// Decrypt base64 ciphertext produced by [`encrypt`](Self::encrypt)
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, DecryptError> {
        let bytes = general_purpose::STANDARD.decode(ciphertext)?;

        if bytes.is_empty() || bytes.len() % BLOCK_SIZE != 0 {
            return Err(DecryptError::InvalidLength { len: bytes.len() });
        }

        let plaintext = Aes256CbcDec::new(&self.key.into(), &ZERO_IV.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
            .map_err(|_| DecryptError::InvalidPadding)?;

        Ok(String::from_utf8(plaintext)?)
    }
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCipher").finish_non_exhaustive()
    }
}
