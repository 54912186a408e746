use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error for an unknown role tag in input or storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown user role: {0}")]
pub struct InvalidRoleError(pub String);

/// Account role, fixed at registration
///
/// The wire tags (token claims, database, registration requests) are the
/// exact variant names: `Adoptante` and `Refugio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Adopter account: browses pets and files adoption requests
    Adoptante,
    /// Shelter account: publishes pets and handles requests
    Refugio,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Adoptante => "Adoptante",
            UserRole::Refugio => "Refugio",
        }
    }

    /// Parse a wire tag. Unknown tags are an error, not a panic: this is
    /// reached from registration input and from database rows.
    #[inline]
    pub fn from_code(code: &str) -> Result<Self, InvalidRoleError> {
        match code {
            "Adoptante" => Ok(UserRole::Adoptante),
            "Refugio" => Ok(UserRole::Refugio),
            other => Err(InvalidRoleError(other.to_string())),
        }
    }

    #[inline]
    pub const fn is_shelter(&self) -> bool {
        matches!(self, UserRole::Refugio)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
