//! Tag registry
//!
//! Owns every tag in the simulation. Tags are kept in configured order for a
//! stable enumeration, with an id index for direct lookup.

use crate::facility::ZoneRegistry;
use crate::tag::Tag;
use crate::types::{TagConfig, TagId};
use rand::Rng;
use std::collections::HashMap;

/// A collection of tags with lookup capabilities
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    /// All tags, in insertion order
    tags: Vec<Tag>,
    /// Quick lookup map from tag ID to index
    tag_index: HashMap<TagId, usize>,
}

impl TagRegistry {
    /// Create a new empty tag registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from configuration
    pub fn from_config<R: Rng + ?Sized>(configs: &[TagConfig], zones: &ZoneRegistry, rng: &mut R) -> Self {
        let mut registry = Self::new();
        for config in configs {
            registry.insert(Tag::from_config(config, zones, rng));
        }
        registry
    }

    /// Add a tag, replacing any existing tag with the same id
    ///
    /// Returns the replaced tag, if there was one.
    pub fn insert(&mut self, tag: Tag) -> Option<Tag> {
        match self.tag_index.get(&tag.id) {
            Some(&idx) => Some(std::mem::replace(&mut self.tags[idx], tag)),
            None => {
                self.tag_index.insert(tag.id.clone(), self.tags.len());
                self.tags.push(tag);
                None
            }
        }
    }

    /// Get a tag by ID
    pub fn get(&self, tag_id: &str) -> Option<&Tag> {
        self.tag_index.get(tag_id).and_then(|&idx| self.tags.get(idx))
    }

    /// Get a mutable reference to a tag by ID
    pub fn get_mut(&mut self, tag_id: &str) -> Option<&mut Tag> {
        match self.tag_index.get(tag_id) {
            Some(&idx) => self.tags.get_mut(idx),
            None => None,
        }
    }

    /// Check if a tag is registered
    pub fn contains(&self, tag_id: &str) -> bool {
        self.tag_index.contains_key(tag_id)
    }

    /// All tags in insertion order
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    /// Iterate over all tags
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Iterate mutably over all tags
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tag> {
        self.tags.iter_mut()
    }

    /// All tag ids in insertion order
    pub fn ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|t| t.id.clone()).collect()
    }

    /// Tags currently assigned to the given zone
    pub fn in_zone(&self, zone_id: &str) -> Vec<&Tag> {
        self.tags.iter().filter(|t| t.is_in(zone_id)).collect()
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the registry has no tags
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::Position;
    use crate::types::{TagType, ZoneId};

    fn tag(id: &str, zone: Option<&str>) -> Tag {
        let mut tag = Tag::new(id, id.to_uppercase(), TagType::Person, Position::default());
        tag.zone_id = zone.map(ZoneId::from);
        tag
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = TagRegistry::new();
        assert!(registry.insert(tag("a", None)).is_none());
        assert!(registry.insert(tag("b", None)).is_none());

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
        assert_eq!(registry.get("b").unwrap().name, "B");
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut registry = TagRegistry::new();
        registry.insert(tag("a", None));
        registry.insert(tag("b", None));

        let replaced = registry.insert(tag("a", Some("z1")));
        assert!(replaced.is_some());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec![TagId::new("a"), TagId::new("b")]);
        assert!(registry.get("a").unwrap().is_in("z1"));
    }

    #[test]
    fn test_get_mut() {
        let mut registry = TagRegistry::new();
        registry.insert(tag("a", None));

        registry.get_mut("a").unwrap().battery = 12;
        assert_eq!(registry.get("a").unwrap().battery, 12);
        assert!(registry.get_mut("missing").is_none());
    }

    #[test]
    fn test_in_zone() {
        let mut registry = TagRegistry::new();
        registry.insert(tag("a", Some("z1")));
        registry.insert(tag("b", Some("z2")));
        registry.insert(tag("c", Some("z1")));
        registry.insert(tag("d", None));

        let in_z1: Vec<&str> = registry.in_zone("z1").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(in_z1, vec!["a", "c"]);
        assert!(registry.in_zone("nowhere").is_empty());
    }
}
