//! Token Issuance
//!
//! Builds the signed bearer token returned by a successful login. The
//! claim set carries the cleartext `name`, `nameidentifier` and `role`
//! claims for framework-level checks, plus the encrypted `UserData`
//! claim holding the serialized [`Principal`].

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use platform::cipher::PayloadCipher;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::principal::Principal;
use crate::error::{AuthError, AuthResult};

/// Claim set of an issued bearer token
///
/// `UserData` is the base64 ciphertext of the principal JSON. It is
/// optional on deserialization because a structurally valid token may
/// lack it; the validator turns that into an explicit failure instead of
/// a crash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub aud: String,
    /// Not-before, seconds since epoch
    pub nbf: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Cleartext user name
    pub name: String,
    /// Cleartext user id, as text
    pub nameidentifier: String,
    /// Cleartext role tag
    pub role: String,
    /// Encrypted principal payload
    #[serde(rename = "UserData", skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

/// A freshly issued token plus its expiry, for the login response
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at_ms: i64,
}

/// Builds signed bearer tokens after successful authentication
///
/// Two logins for the same user at different instants yield different
/// tokens (the timestamps differ) even though the `UserData` claim is
/// deterministic per identity.
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
    cipher: PayloadCipher,
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    /// Create an issuer from the process-wide configuration
    ///
    /// The signing key is fixed at startup; a missing secret is caught by
    /// config loading before this point.
    pub fn new(config: Arc<AuthConfig>, cipher: PayloadCipher) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        Self {
            config,
            cipher,
            encoding_key,
        }
    }

    /// Issue a token for a verified user
    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.config.token_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))?;
        let expires_at = now + ttl;

        let principal = Principal::new(user.user_id, user.user_name.original(), user.role);
        let payload = serde_json::to_string(&principal)?;
        let user_data = self.cipher.encrypt(&payload);

        let claims = TokenClaims {
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            name: user.user_name.original().to_string(),
            nameidentifier: user.user_id.to_string(),
            role: user.role.code().to_string(),
            user_data: Some(user_data),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at_ms: expires_at.timestamp_millis(),
        })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
