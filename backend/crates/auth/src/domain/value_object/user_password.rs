//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Registration input is
//! validated against the password policy; login input is accepted as-is
//! because it is only ever compared against a stored digest.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, StoredPassword};
//!
//! let raw = RawPassword::new("Secret#123A".to_string())?;
//! let stored = StoredPassword::from_raw(&raw);
//! assert!(stored.verify(&raw));
//! # Ok::<(), platform::password::PasswordPolicyError>(())
//! ```

use std::fmt;

use platform::password::{
    ClearTextPassword, DEFAULT_HASH_ROUNDS, PasswordDigest, PasswordPolicyError, Salt,
};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped; Debug output is
/// redacted by the inner type.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a validated raw password (registration path)
    ///
    /// Policy: 8-128 characters with at least one lowercase letter, one
    /// uppercase letter, one digit and one symbol.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    /// Create without policy validation (login path)
    ///
    /// Login input must accept passwords that predate the current policy;
    /// they only ever feed a digest comparison.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Stored Password (salt + digest, for storage)
// ============================================================================

/// Stored password material: per-user salt, digest and round count
///
/// The salt is generated once at registration and never changes. The
/// digest is never reversed, only recomputed and compared in constant
/// time.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredPassword {
    salt: Salt,
    digest: PasswordDigest,
    rounds: u32,
}

impl StoredPassword {
    /// Hash a fresh password with a newly generated salt
    pub fn from_raw(raw: &RawPassword) -> Self {
        let salt = Salt::generate();
        let digest = raw.inner().digest(&salt, DEFAULT_HASH_ROUNDS);
        Self {
            salt,
            digest,
            rounds: DEFAULT_HASH_ROUNDS,
        }
    }

    /// Reconstruct from database columns
    pub fn from_parts(salt: String, digest: Vec<u8>, rounds: u32) -> Self {
        Self {
            salt: Salt::from_string(salt),
            digest: PasswordDigest::from_bytes(digest),
            rounds,
        }
    }

    /// Verify a raw password against this stored material
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.digest.verify(raw.inner(), &self.salt, self.rounds)
    }

    /// Salt text for database storage
    pub fn salt(&self) -> &str {
        self.salt.as_str()
    }

    /// Digest bytes for database storage
    pub fn digest_bytes(&self) -> &[u8] {
        self.digest.as_bytes()
    }

    /// SHA-512 round count used for this digest
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPassword")
            .field("rounds", &self.rounds)
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
    fn test_raw_password_validation() {
        assert!(RawPassword::new("Secret#123A".to_string()).is_ok());
        assert!(RawPassword::new("weak".to_string()).is_err());
        assert!(RawPassword::new("alllowercase1!".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
    }

    #[test]
    fn test_login_password_skips_policy() {
        // Legacy password that would fail the current policy
        let raw = RawPassword::for_login("oldpw".to_string());
        let stored = StoredPassword::from_parts(
            "legacy-salt".to_string(),
            RawPassword::for_login("oldpw".to_string())
                .inner()
                .digest(&Salt::from_string("legacy-salt"), DEFAULT_HASH_ROUNDS)
                .as_bytes()
                .to_vec(),
            DEFAULT_HASH_ROUNDS,
        );
        assert!(stored.verify(&raw));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Secret#123A".to_string()).unwrap();
        let stored = StoredPassword::from_raw(&raw);

        assert!(stored.verify(&raw));

        let wrong = RawPassword::for_login("Secret#123B".to_string());
        assert!(!stored.verify(&wrong));
    }

    #[test]
    fn test_fresh_salt_per_registration() {
        let raw = RawPassword::new("Secret#123A".to_string()).unwrap();
        let a = StoredPassword::from_raw(&raw);
        let b = StoredPassword::from_raw(&raw);

        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.digest_bytes(), b.digest_bytes());
    }

    #[test]
    fn test_storage_roundtrip() {
        let raw = RawPassword::new("Secret#123A".to_string()).unwrap();
        let stored = StoredPassword::from_raw(&raw);

        let restored = StoredPassword::from_parts(
            stored.salt().to_string(),
            stored.digest_bytes().to_vec(),
            stored.rounds(),
        );

        assert!(restored.verify(&raw));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("Secret#123A".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));
    }
}
