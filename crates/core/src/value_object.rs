//! Value objects: equality by value, not identity.
//!
//! Value objects are defined entirely by their attribute values and validated
//! once, at construction. Code holding an `ItemName` never re-checks it.

use serde::{Deserialize, Serialize};

use crate::error::{PantryError, PantryResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Name of a stock line; the identity key of a `StockItem`.
///
/// Matching is exact and case-sensitive: `"Apple"` and `"apple"` are distinct
/// items. The string is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn parse(raw: impl Into<String>) -> PantryResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PantryError::invalid_argument("item name cannot be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match; an empty term matches every name.
    pub fn matches_term(&self, term: &str) -> bool {
        term.is_empty() || self.0.to_lowercase().contains(&term.to_lowercase())
    }
}

impl ValueObject for ItemName {}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemName {
    type Error = PantryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque reference (URL or handle) to an image held by an external blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn parse(raw: impl Into<String>) -> PantryResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PantryError::invalid_argument("photo reference cannot be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PhotoRef {}

impl core::fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhotoRef {
    type Error = PantryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PhotoRef> for String {
    fn from(value: PhotoRef) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_name_rejects_blank_input() {
        assert!(matches!(ItemName::parse(""), Err(PantryError::InvalidArgument(_))));
        assert!(matches!(ItemName::parse("   "), Err(PantryError::InvalidArgument(_))));
    }

    #[test]
    fn item_name_is_stored_verbatim() {
        let name = ItemName::parse("Granny Smith ").unwrap();
        assert_eq!(name.as_str(), "Granny Smith ");
        assert_ne!(name, ItemName::parse("granny smith ").unwrap());
    }

    #[test]
    fn term_matching_ignores_case() {
        let name = ItemName::parse("Peanut Butter").unwrap();
        assert!(name.matches_term("butter"));
        assert!(name.matches_term("PEANUT"));
        assert!(name.matches_term(""));
        assert!(!name.matches_term("jam"));
    }

    #[test]
    fn deserialization_validates() {
        let ok: ItemName = serde_json::from_str("\"apple\"").unwrap();
        assert_eq!(ok.as_str(), "apple");

        assert!(serde_json::from_str::<ItemName>("\"\"").is_err());
        assert!(serde_json::from_str::<PhotoRef>("\" \"").is_err());
    }
}
