//! Token Validation
//!
//! Recovers a trustworthy [`Principal`] from a presented bearer token.
//! Validation is a strict two-step, two-state machine per request:
//!
//! 1. Signature, issuer, audience, not-before and expiry are checked by
//!    `jsonwebtoken` with zero clock skew. Any failure rejects the token
//!    before decryption runs.
//! 2. The `UserData` claim is decrypted and deserialized. A missing
//!    claim is [`AuthError::PrincipalMissing`]; an undecryptable or
//!    unparsable one is [`AuthError::PrincipalMalformed`]. Neither is
//!    ever a crash or a default principal.
//!
//! Validation is performed freshly for every request; nothing is cached
//! across requests.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use platform::cipher::PayloadCipher;

use crate::application::config::AuthConfig;
use crate::application::token_issuer::TokenClaims;
use crate::domain::value_object::{principal::Principal, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// The outcome of a successful validation: the verified claim set and
/// the decrypted principal
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    claims: TokenClaims,
    principal: Principal,
}

impl ValidatedToken {
    /// The recovered principal
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Consume into the principal (for insertion into request state)
    pub fn into_principal(self) -> Principal {
        self.principal
    }

    /// The authenticated user id, for data scoping
    pub fn authenticated_user_id(&self) -> UserId {
        self.principal.user_id
    }

    /// The verified raw claim set
    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }
}

/// Validates bearer tokens and recovers the embedded principal
#[derive(Clone)]
pub struct TokenValidator {
    cipher: PayloadCipher,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator from the process-wide configuration
    pub fn new(config: Arc<AuthConfig>, cipher: PayloadCipher) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_nbf = true;
        // No grace period, matching the issuing side's fixed window
        validation.leeway = 0;

        Self {
            cipher,
            decoding_key,
            validation,
        }
    }

    /// Validate a presented token and recover its principal
    pub fn validate(&self, token: &str) -> AuthResult<ValidatedToken> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            },
        )?;

        let claims = data.claims;

        let user_data = claims
            .user_data
            .as_deref()
            .ok_or(AuthError::PrincipalMissing)?;

        let payload = self
            .cipher
            .decrypt(user_data)
            .map_err(|_| AuthError::PrincipalMalformed)?;

        let principal: Principal =
            serde_json::from_str(&payload).map_err(|_| AuthError::PrincipalMalformed)?;

        Ok(ValidatedToken { claims, principal })
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator").finish_non_exhaustive()
    }
}
