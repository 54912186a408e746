//! User Name Value Object
//!
//! ユーザー名は、ログインと画面表示に使用される公開識別子（ハンドル）。
//!
//! ## 設計方針
//! - ASCII文字のみ許可（a-z, 0-9, _ . -）
//! - 大文字入力は受け付けるが、canonical（正規形）は小文字
//! - NFKC正規化 → 検証 → 小文字化 の順で処理
//! - 一意性チェックは canonical 形で行う（既存データは小文字比較）
//!
//! ## 不変条件
//! - 長さ: 3〜30文字（正規化後）
//! - 先頭: 英数字
//! - 英数字を最低1文字含む

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

// ============================================================================
// Error Type
// ============================================================================

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("User name must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("User name contains invalid character: {0:?}")]
    InvalidCharacter(char),

    #[error("User name must start with a letter or digit")]
    InvalidFirstCharacter,
}

// ============================================================================
// UserName
// ============================================================================

/// Validated user name
///
/// Stores the original (case preserved, for display) and the canonical
/// lowercase form (for lookups and uniqueness).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    /// Preserves case in original, stores lowercase in canonical.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = Self::normalize(input.as_ref());
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original user name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (normalized, lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    /// Normalize input string (trim and NFKC, preserve case)
    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    /// Validate the canonical user name
    fn validate(canonical: &str) -> Result<(), UserNameError> {
        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let char_count = canonical.chars().count();
        if char_count < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                min: USER_NAME_MIN_LENGTH,
                actual: char_count,
            });
        }
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: USER_NAME_MAX_LENGTH,
                actual: char_count,
            });
        }

        for ch in canonical.chars() {
            if !ch.is_ascii_alphanumeric() && !ALLOWED_SPECIAL_CHARS.contains(&ch) {
                return Err(UserNameError::InvalidCharacter(ch));
            }
        }

        let first = canonical.chars().next().expect("checked non-empty");
        if !first.is_ascii_alphanumeric() {
            return Err(UserNameError::InvalidFirstCharacter);
        }

        Ok(())
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["ana", "Ana42", "shelter.north", "a_b-c", "x".repeat(30).as_str()] {
            assert!(UserName::new(name).is_ok(), "expected ok for {name:?}");
        }
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = UserName::new("AnaLopez").unwrap();
        assert_eq!(name.original(), "AnaLopez");
        assert_eq!(name.canonical(), "analopez");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
    }

    #[test]
    fn test_rejects_length_bounds() {
        assert!(matches!(
            UserName::new("ab").unwrap_err(),
            UserNameError::TooShort { .. }
        ));
        assert!(matches!(
            UserName::new("x".repeat(31)).unwrap_err(),
            UserNameError::TooLong { .. }
        ));
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert!(matches!(
            UserName::new("ana lopez").unwrap_err(),
            UserNameError::InvalidCharacter(' ')
        ));
        assert!(matches!(
            UserName::new("ana@home").unwrap_err(),
            UserNameError::InvalidCharacter('@')
        ));
    }

    #[test]
    fn test_rejects_symbol_prefix() {
        assert_eq!(
            UserName::new("_ana").unwrap_err(),
            UserNameError::InvalidFirstCharacter
        );
    }

    #[test]
    fn test_trims_whitespace() {
        let name = UserName::new("  ana  ").unwrap();
        assert_eq!(name.original(), "ana");
    }
}
