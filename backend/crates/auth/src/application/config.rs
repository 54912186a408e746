//! Application Configuration
//!
//! Configuration for the Auth application layer.
//!
//! All key material is loaded once at startup and owned by an immutable
//! [`AuthConfig`] passed by `Arc` into the use cases. Nothing mutates it
//! at runtime; there is no rotation scheme (a parameter change makes
//! every outstanding token unreadable, so the configuration is
//! effectively a single version).
//!
//! One shared secret covers both token paths: it signs tokens directly
//! (HMAC-SHA256 over its UTF-8 bytes) and, hashed with the salt for the
//! configured iteration count, yields the independent payload-cipher key.

use std::env;
use std::time::Duration;

use platform::cipher::PayloadCipher;
use thiserror::Error;

/// Bearer token validity window
pub const TOKEN_TTL: Duration = Duration::from_secs(2 * 3600);

/// Startup configuration errors. Fatal: the process must not start with
/// partial key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Configuration value {0} must be a positive integer")]
    InvalidIterations(&'static str),
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token issuer (`iss` claim)
    pub issuer: String,
    /// Token audience (`aud` claim)
    pub audience: String,
    /// Shared secret: signs tokens and seeds the cipher key derivation
    pub secret_key: String,
    /// Salt for cipher key derivation
    pub salt: String,
    /// SHA-256 iteration count for cipher key derivation
    pub iterations: u32,
    /// Token validity window
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Environment variable names, also used in error messages
    const VARS: [&'static str; 5] = [
        "AUTH_ISSUER",
        "AUTH_AUDIENCE",
        "AUTH_SECRET_KEY",
        "AUTH_SALT",
        "AUTH_ITERATIONS",
    ];

    /// Load configuration from the environment
    ///
    /// Every value is required; a missing or empty variable is a fatal
    /// startup error, never a per-request one.
    pub fn from_env() -> Result<Self, ConfigError> {
        let [issuer, audience, secret_key, salt, iterations_raw] =
            Self::VARS.map(|name| env::var(name).ok().filter(|v| !v.is_empty()));

        let issuer = issuer.ok_or(ConfigError::Missing(Self::VARS[0]))?;
        let audience = audience.ok_or(ConfigError::Missing(Self::VARS[1]))?;
        let secret_key = secret_key.ok_or(ConfigError::Missing(Self::VARS[2]))?;
        let salt = salt.ok_or(ConfigError::Missing(Self::VARS[3]))?;

        let iterations = iterations_raw
            .ok_or(ConfigError::Missing(Self::VARS[4]))?
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidIterations(Self::VARS[4]))?;

        Ok(Self {
            issuer,
            audience,
            secret_key,
            salt,
            iterations,
            token_ttl: TOKEN_TTL,
        })
    }

    /// Fixed configuration for development and tests
    ///
    /// Not for production: the key material is public by definition.
    pub fn development() -> Self {
        Self {
            issuer: "zuvopet-dev".to_string(),
            audience: "zuvopet-clients".to_string(),
            secret_key: "dev-signing-secret-not-for-production-use".to_string(),
            salt: "dev-derivation-salt".to_string(),
            iterations: 1000,
            token_ttl: TOKEN_TTL,
        }
    }

    /// Build the payload cipher from the derivation parameters
    ///
    /// Derivation runs `iterations` hash rounds, so callers should build
    /// this once and clone the result.
    pub fn payload_cipher(&self) -> PayloadCipher {
        PayloadCipher::new(&self.secret_key, &self.salt, self.iterations)
    }

    /// Token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl.as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_is_complete() {
        let config = AuthConfig::development();
        assert!(!config.issuer.is_empty());
        assert!(!config.secret_key.is_empty());
        assert!(config.iterations > 0);
        assert_eq!(config.token_ttl, TOKEN_TTL);
    }

    #[test]
    fn test_payload_cipher_is_stable() {
        let config = AuthConfig::development();
        let a = config.payload_cipher();
        let b = config.payload_cipher();
        assert_eq!(a.encrypt("payload"), b.encrypt("payload"));
    }

    #[test]
    fn test_cipher_key_is_independent_of_signing_path() {
        // Same secret, different salt or iteration count: different
        // cipher key, even though the signing key is unchanged.
        let config = AuthConfig::development();

        let mut other_salt = config.clone();
        other_salt.salt = "different-salt".to_string();
        assert_ne!(
            config.payload_cipher().encrypt("payload"),
            other_salt.payload_cipher().encrypt("payload")
        );

        let mut other_rounds = config.clone();
        other_rounds.iterations += 1;
        assert_ne!(
            config.payload_cipher().encrypt("payload"),
            other_rounds.payload_cipher().encrypt("payload")
        );
    }
}
