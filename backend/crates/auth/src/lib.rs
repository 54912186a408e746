//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases, token issuance and validation
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - User signup with role selection (Adoptante or Refugio)
//! - Signin with username + password, returning a signed bearer token
//! - Stateless authentication: the principal travels encrypted inside
//!   the token's `UserData` claim, no server-side session store
//!
//! ## Security Model
//! - Passwords hashed with salted iterated SHA-512 (per-user salt,
//!   constant-time verification)
//! - Tokens signed with HMAC-SHA256, validated with zero clock skew
//! - Identity payload encrypted with AES-256-CBC under a hash-derived
//!   key (deterministic ciphertext, kept for wire compatibility)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod token {
    pub use crate::application::token_issuer::*;
    pub use crate::application::token_validator::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
