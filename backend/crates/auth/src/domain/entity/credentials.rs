//! Credentials Entity
//!
//! Authentication credentials for a user.
//! Separated from the User entity to isolate sensitive data.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_id::UserId, user_password::StoredPassword};

/// Credential record entity
///
/// Invariants:
/// - the salt inside [`StoredPassword`] is generated once at registration
///   and never changes
/// - the digest is never reversed, only recomputed and compared
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Reference to User
    pub user_id: UserId,
    /// Salt, digest and round count
    pub password: StoredPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credentials {
    /// Create new credentials for a freshly registered user
    pub fn new(user_id: UserId, password: StoredPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password,
            created_at: now,
            updated_at: now,
        }
    }
}
