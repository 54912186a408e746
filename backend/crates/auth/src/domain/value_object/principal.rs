//! Principal Value Object
//!
//! The authenticated identity recovered from a request's bearer token.
//! Created at login from the verified user record, encrypted into the
//! `UserData` claim, and reconstructed on each authenticated request.
//! Never persisted; its lifetime is one token's validity window.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Authenticated identity carried inside the token
///
/// The serde field names are the wire contract of the `UserData` claim
/// and must not change while issued tokens are in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(rename = "IdUsuario")]
    pub user_id: UserId,
    #[serde(rename = "NombreUsuario")]
    pub user_name: String,
    #[serde(rename = "Role")]
    pub role: UserRole,
}

impl Principal {
    pub fn new(user_id: UserId, user_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let principal = Principal::new(UserId::from_i32(42), "ana", UserRole::Adoptante);
        let json = serde_json::to_string(&principal).unwrap();
        assert_eq!(
            json,
            r#"{"IdUsuario":42,"NombreUsuario":"ana","Role":"Adoptante"}"#
        );
    }

    #[test]
    fn test_wire_roundtrip() {
        let json = r#"{"IdUsuario":7,"NombreUsuario":"refugio.norte","Role":"Refugio"}"#;
        let principal: Principal = serde_json::from_str(json).unwrap();
        assert_eq!(principal.user_id.as_i32(), 7);
        assert_eq!(principal.user_name, "refugio.norte");
        assert_eq!(principal.role, UserRole::Refugio);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let json = r#"{"IdUsuario":7}"#;
        assert!(serde_json::from_str::<Principal>(json).is_err());
    }
}
