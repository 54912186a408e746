//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod sign_in;
pub mod sign_up;
pub mod token_issuer;
pub mod token_validator;

// Re-exports
pub use config::{AuthConfig, ConfigError};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token_issuer::{IssuedToken, TokenClaims, TokenIssuer};
pub use token_validator::{TokenValidator, ValidatedToken};
