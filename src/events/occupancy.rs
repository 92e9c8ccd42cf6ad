//! Zone occupancy records
//!
//! Occupancy lists the tags currently assigned to a zone. The engine generation
//! is stamped into each record so a reader can tell which tick it reflects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tag::Tag;
use crate::types::{TagId, TagType, ZoneId};

/// One tag listed in a zone occupancy record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    /// Tag id
    pub tag_id: TagId,
    /// Tag display name
    pub name: String,
    /// Tag type
    #[serde(rename = "type")]
    pub tag_type: TagType,
    /// Time of the tag's last update
    pub entered_at: Option<DateTime<Utc>>,
}

impl From<&Tag> for Occupant {
    fn from(tag: &Tag) -> Self {
        Self {
            tag_id: tag.id.clone(),
            name: tag.name.clone(),
            tag_type: tag.tag_type,
            entered_at: tag.last_update,
        }
    }
}

/// Tags currently assigned to a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneOccupancy {
    /// Zone described
    pub zone_id: ZoneId,
    /// Number of occupants
    pub tag_count: usize,
    /// Occupants in registry order
    pub tags: Vec<Occupant>,
    /// Engine generation the snapshot was taken at
    pub generation: u64,
}

impl ZoneOccupancy {
    /// Build an occupancy record from the tags in a zone
    pub fn new<'a>(zone_id: ZoneId, tags: impl IntoIterator<Item = &'a Tag>, generation: u64) -> Self {
        let tags: Vec<Occupant> = tags.into_iter().map(Occupant::from).collect();
        Self { zone_id, tag_count: tags.len(), tags, generation }
    }

    /// Whether the zone is empty
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::Position;

    #[test]
    fn test_occupancy_from_tags() {
        let mut a = Tag::new("a", "Alpha", TagType::Person, Position::default());
        a.last_update = Some(Utc::now());
        let b = Tag::new("b", "Bravo", TagType::Vehicle, Position::default());

        let occupancy = ZoneOccupancy::new(ZoneId::new("z1"), [&a, &b], 3);

        assert_eq!(occupancy.tag_count, 2);
        assert_eq!(occupancy.generation, 3);
        assert_eq!(occupancy.tags[0].name, "Alpha");
        assert!(occupancy.tags[0].entered_at.is_some());
        assert!(occupancy.tags[1].entered_at.is_none());

        let json: serde_json::Value = serde_json::from_str(&occupancy.to_json().unwrap()).unwrap();
        assert_eq!(json["tags"][1]["type"], "vehicle");
    }

    #[test]
    fn test_empty_occupancy() {
        let occupancy = ZoneOccupancy::new(ZoneId::new("z2"), Vec::<&Tag>::new(), 0);
        assert!(occupancy.is_empty());
        assert_eq!(occupancy.tag_count, 0);
    }
}
