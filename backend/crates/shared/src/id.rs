//! Common ID Types
//!
//! Type-safe wrappers around the database-assigned integer keys.
//! The wire format of this API exposes entity ids as plain integers,
//! so the wrapper keeps the `i32` representation instead of hiding
//! it behind a UUID.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::Id;
///
/// struct UserMarker;
/// type UserId = Id<UserMarker>;
///
/// let id = UserId::from_i32(42);
/// assert_eq!(id.as_i32(), 42);
/// ```
pub struct Id<T> {
    value: i32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap an existing database key
    pub fn from_i32(value: i32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer
    pub fn as_i32(&self) -> i32 {
        self.value
    }
}

// Manual impls so `T` does not need to satisfy any derive bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(Self::from_i32)
    }
}

impl<T> From<i32> for Id<T> {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl<T> From<Id<T>> for i32 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UserMarker;
    type UserId = Id<UserMarker>;

    #[test]
    fn test_id_roundtrip() {
        let id = UserId::from_i32(7);
        assert_eq!(id.as_i32(), 7);
        let raw: i32 = id.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_id_display() {
        let id = UserId::from_i32(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{:?}", id), "Id(42)");
    }

    #[test]
    fn test_id_serde_as_integer() {
        let id = UserId::from_i32(13);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "13");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
