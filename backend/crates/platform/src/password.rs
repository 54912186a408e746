//! Password Hashing and Verification
//!
//! Salted, iterated SHA-512 password digests:
//! - Per-user random salt (256-bit, base64 encoded)
//! - Fixed-length 64-byte digest, deterministic for (password, salt, rounds)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! The digest scheme is compatible with the stored credentials of the
//! existing deployments: the salt is appended to the password, and the
//! SHA-512 output is re-hashed a fixed number of rounds.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, random_bytes, sha512, to_base64};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Salt entropy in bytes (256 bits)
pub const SALT_LENGTH: usize = 32;

/// Default number of SHA-512 rounds applied over the seed material.
///
/// Stored alongside each credential so existing digests keep verifying
/// if the default ever changes.
pub const DEFAULT_HASH_ROUNDS: u32 = 15;

/// Digest output length (SHA-512)
pub const DIGEST_LENGTH: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    /// Missing a required character class
    #[error("Password must contain a lowercase letter")]
    MissingLowercase,

    #[error("Password must contain an uppercase letter")]
    MissingUppercase,

    #[error("Password must contain a digit")]
    MissingDigit,

    #[error("Password must contain a symbol")]
    MissingSymbol,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Validates the registration policy:
    /// - 8 to 128 characters
    /// - At least one lowercase letter, one uppercase letter, one digit
    ///   and one non-alphanumeric character
    /// - No control characters
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        // Unicode NFKC normalization before processing
        let normalized: String = raw.nfkc().collect();

        // Check for empty or whitespace-only
        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points (not bytes)
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Check for control characters (except space, tab, newline)
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        // Character class requirements
        if !normalized.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !normalized.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !normalized.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !normalized.chars().any(|c| !c.is_ascii_alphanumeric()) {
            return Err(PasswordPolicyError::MissingSymbol);
        }

        Ok(Self(normalized))
    }

    /// Create without validation (for login input, which is only ever
    /// compared against a stored digest and must accept legacy passwords
    /// that predate the current policy)
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Compute the stored digest for this password and salt
    ///
    /// The seed is the UTF-8 concatenation `password + salt`; SHA-512 is
    /// then applied `rounds` times over its own output. Deterministic:
    /// same (password, salt, rounds) always yields the same digest.
    pub fn digest(&self, salt: &Salt, rounds: u32) -> PasswordDigest {
        let mut seed = Vec::with_capacity(self.as_bytes().len() + salt.as_str().len());
        seed.extend_from_slice(self.as_bytes());
        seed.extend_from_slice(salt.as_str().as_bytes());

        let mut output = seed;
        for _ in 0..rounds.max(1) {
            output = sha512(&output).to_vec();
        }

        PasswordDigest(output)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Salt
// ============================================================================

/// Per-user random salt, stored as base64 text
///
/// Generated once at registration and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Generate a fresh salt with 256 bits of entropy
    ///
    /// Panics only if the OS randomness source is unavailable, which is
    /// not a recoverable condition for this process.
    pub fn generate() -> Self {
        Self(to_base64(&random_bytes(SALT_LENGTH)))
    }

    /// Reconstruct a salt loaded from storage
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the textual form (as stored and as hashed)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Password Digest (Safe to store)
// ============================================================================

/// Fixed-length password digest for database storage
///
/// Never reversed; only ever recomputed and compared.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(Vec<u8>);

impl PasswordDigest {
    /// Reconstruct a digest loaded from storage
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes for storage
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Verify a password against this digest
    ///
    /// Recomputes the digest with the stored salt and round count and
    /// compares in constant time. A length mismatch is never equal.
    pub fn verify(&self, password: &ClearTextPassword, salt: &Salt, rounds: u32) -> bool {
        let candidate = password.digest(salt, rounds);
        constant_time_eq(&self.0, candidate.as_bytes())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("Ab1!".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = format!("Aa1!{}", "x".repeat(MAX_PASSWORD_LENGTH));
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_character_classes() {
        assert!(matches!(
            ClearTextPassword::new("nouppercase1!".to_string()),
            Err(PasswordPolicyError::MissingUppercase)
        ));
        assert!(matches!(
            ClearTextPassword::new("NOLOWERCASE1!".to_string()),
            Err(PasswordPolicyError::MissingLowercase)
        ));
        assert!(matches!(
            ClearTextPassword::new("NoDigitsHere!".to_string()),
            Err(PasswordPolicyError::MissingDigit)
        ));
        assert!(matches!(
            ClearTextPassword::new("NoSymbols123".to_string()),
            Err(PasswordPolicyError::MissingSymbol)
        ));
    }

    #[test]
    fn test_valid_password() {
        assert!(ClearTextPassword::new("Secret#123A".to_string()).is_ok());
    }

    #[test]
    fn test_salt_generation() {
        let a = Salt::generate();
        let b = Salt::generate();
        assert_ne!(a, b);
        // 32 random bytes => 44 base64 characters
        assert_eq!(a.as_str().len(), 44);
    }

    #[test]
    fn test_digest_deterministic() {
        let password = ClearTextPassword::new_unchecked("Secret#123A".to_string());
        let salt = Salt::from_string("fixed-salt");

        let first = password.digest(&salt, DEFAULT_HASH_ROUNDS);
        let second = password.digest(&salt, DEFAULT_HASH_ROUNDS);

        assert_eq!(first, second);
        assert_eq!(first.as_bytes().len(), DIGEST_LENGTH);
    }

    #[test]
    fn test_digest_differs_per_salt() {
        let password = ClearTextPassword::new_unchecked("Secret#123A".to_string());

        let a = password.digest(&Salt::from_string("salt-a"), DEFAULT_HASH_ROUNDS);
        let b = password.digest(&Salt::from_string("salt-b"), DEFAULT_HASH_ROUNDS);

        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_differs_per_rounds() {
        let password = ClearTextPassword::new_unchecked("Secret#123A".to_string());
        let salt = Salt::from_string("fixed-salt");

        let a = password.digest(&salt, 15);
        let b = password.digest(&salt, 16);

        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_correct_password() {
        let password = ClearTextPassword::new_unchecked("Secret#123A".to_string());
        let salt = Salt::generate();
        let stored = password.digest(&salt, DEFAULT_HASH_ROUNDS);

        assert!(stored.verify(&password, &salt, DEFAULT_HASH_ROUNDS));
    }

    #[test]
    fn test_verify_wrong_password() {
        let password = ClearTextPassword::new_unchecked("Secret#123A".to_string());
        let wrong = ClearTextPassword::new_unchecked("Secret#123B".to_string());
        let salt = Salt::generate();
        let stored = password.digest(&salt, DEFAULT_HASH_ROUNDS);

        assert!(!stored.verify(&wrong, &salt, DEFAULT_HASH_ROUNDS));
    }

    #[test]
    fn test_verify_wrong_salt() {
        let password = ClearTextPassword::new_unchecked("Secret#123A".to_string());
        let stored = password.digest(&Salt::from_string("salt-a"), DEFAULT_HASH_ROUNDS);

        assert!(!stored.verify(&password, &Salt::from_string("salt-b"), DEFAULT_HASH_ROUNDS));
    }

    #[test]
    fn test_verify_length_mismatch() {
        let password = ClearTextPassword::new_unchecked("Secret#123A".to_string());
        let salt = Salt::generate();
        let truncated = PasswordDigest::from_bytes(vec![0u8; 16]);

        assert!(!truncated.verify(&password, &salt, DEFAULT_HASH_ROUNDS));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new_unchecked("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
