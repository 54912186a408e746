//! User Entity
//!
//! Core user account entity containing non-sensitive user data.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};

/// User account entity
///
/// Contains the public account profile. Sensitive credential material
/// lives in the [`Credentials`](super::credentials::Credentials) entity.
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned integer identifier
    pub user_id: UserId,
    /// User name (unique, for login and display)
    pub user_name: UserName,
    /// Email address (unique)
    pub email: Email,
    /// Role fixed at registration (Adoptante or Refugio)
    pub role: UserRole,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// A user account that has not been persisted yet
///
/// The database assigns the integer id on insert, so creation goes
/// through this intermediate instead of a half-initialized [`User`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub role: UserRole,
}

impl NewUser {
    pub fn new(user_name: UserName, email: Email, role: UserRole) -> Self {
        Self {
            user_name,
            email,
            role,
        }
    }
}
