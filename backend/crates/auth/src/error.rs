//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Propagation policy: the absence of a valid principal is always an
//! explicit error the caller must handle. No failure path produces a
//! default principal, and no cryptographic or parsing error is collapsed
//! into a bare boolean.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

use crate::domain::value_object::{
    email::EmailError, user_name::UserNameError, user_role::InvalidRoleError,
};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately a single variant so
    /// the two cases are indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User name or email already in use
    #[error("User name or email already in use")]
    UserExists,

    /// Registration supplied an unknown role tag
    #[error(transparent)]
    InvalidRole(#[from] InvalidRoleError),

    /// Password rejected by the registration policy
    #[error("Password validation failed: {0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// User name rejected by validation
    #[error("User name validation failed: {0}")]
    InvalidUserName(#[from] UserNameError),

    /// Email rejected by validation
    #[error("Email validation failed: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No bearer token on a protected route
    #[error("Missing bearer token")]
    MissingToken,

    /// Token failed signature, issuer, audience or not-before checks
    #[error("Invalid token")]
    TokenInvalid,

    /// Token is past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Token validated but carries no identity claim
    #[error("Token carries no identity claim")]
    PrincipalMissing,

    /// Identity claim present but undecryptable or unparsable
    #[error("Token identity claim is malformed")]
    PrincipalMalformed,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserExists => StatusCode::CONFLICT,
            AuthError::InvalidRole(_)
            | AuthError::PasswordPolicy(_)
            | AuthError::InvalidUserName(_)
            | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            // A malformed or missing principal is an authorization
            // failure, never a 500.
            AuthError::MissingToken
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::PrincipalMissing
            | AuthError::PrincipalMalformed => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::PrincipalMissing
            | AuthError::PrincipalMalformed => ErrorKind::Unauthorized,
            AuthError::UserExists => ErrorKind::Conflict,
            AuthError::InvalidRole(_)
            | AuthError::PasswordPolicy(_)
            | AuthError::InvalidUserName(_)
            | AuthError::InvalidEmail(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::PrincipalMalformed => {
                tracing::warn!("Undecryptable or unparsable identity claim");
            }
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                tracing::debug!(error = %self, "Token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Internal(format!("Serialization error: {err}"))
    }
}
