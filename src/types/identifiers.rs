//! Identifier types for the RTLS simulator
//!
//! Tags and zones are identified by the stable string ids given in the
//! configuration (for example `tag_001` or `zone_lobby`). The newtypes keep the
//! two id spaces apart while still allowing `&str` lookups through [`Borrow`].

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a tracked tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    /// Create a tag ID from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TagId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for TagId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a zone
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Create a zone ID from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ZoneId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ZoneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_tag_id_display_and_str() {
        let id = TagId::new("tag_001");
        assert_eq!(id.to_string(), "tag_001");
        assert_eq!(id.as_str(), "tag_001");
        assert_eq!(id, TagId::from("tag_001"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let tag_id = TagId::new("tag_042");
        assert_eq!(serde_json::to_string(&tag_id).unwrap(), "\"tag_042\"");

        let zone_id: ZoneId = serde_json::from_str("\"zone_dock\"").unwrap();
        assert_eq!(zone_id.as_str(), "zone_dock");
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut map = HashMap::new();
        map.insert(ZoneId::new("zone_a"), 1usize);

        assert_eq!(map.get("zone_a"), Some(&1));
        assert!(map.get("zone_b").is_none());
    }
}
