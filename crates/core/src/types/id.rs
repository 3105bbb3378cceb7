//! Product identifiers.
//!
//! The content backend hands out document IDs that are usually strings but
//! have been seen as bare numbers in older datasets. Every ID is coerced to
//! its string form at the deserialization boundary so that cart and wishlist
//! entries compare equal no matter which shape the backend returned.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A product identifier, always held in string form.
///
/// # Example
///
/// ```rust
/// # use comforty_core::ProductId;
/// let from_text: ProductId = serde_json::from_str("\"42\"").unwrap();
/// let from_number: ProductId = serde_json::from_str("42").unwrap();
/// assert_eq!(from_text, from_number);
/// assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string() {
        let id: ProductId = serde_json::from_str("\"abc-123\"").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_deserialize_number_coerces_to_string() {
        let id: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ProductId::new("7"));
    }

    #[test]
    fn test_deserialize_rejects_other_shapes() {
        assert!(serde_json::from_str::<ProductId>("true").is_err());
        assert!(serde_json::from_str::<ProductId>("{}").is_err());
    }

    #[test]
    fn test_display() {
        let id: ProductId = serde_json::from_str("12").unwrap();
        assert_eq!(id.to_string(), "12");
    }
}
