//! Location update records
//!
//! A LocationUpdate is a read-time projection of a tag. It has no lifecycle of
//! its own and is discarded once handed to the publish boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::facility::{round_to, Position};
use crate::simulation::normalize_heading;
use crate::tag::Tag;
use crate::types::{TagId, ZoneId};

/// Snapshot of a tag's position and telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    /// Tag the update describes
    pub tag_id: TagId,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Position rounded to centimeters
    pub location: Position,
    /// Zone the tag is assigned to, if any
    pub zone_id: Option<ZoneId>,
    /// Speed in m/s, rounded to 2 decimals
    pub speed: f64,
    /// Heading in degrees, rounded to 1 decimal
    pub heading: f64,
    /// Battery percentage
    pub battery: u8,
    /// Signal strength in dBm
    pub rssi: i32,
}

impl LocationUpdate {
    /// Build an update from the tag's current state, stamped now
    pub fn from_tag(tag: &Tag) -> Self {
        Self::from_tag_at(tag, Utc::now())
    }

    /// Build an update from the tag's current state with an explicit timestamp
    pub fn from_tag_at(tag: &Tag, timestamp: DateTime<Utc>) -> Self {
        Self {
            tag_id: tag.id.clone(),
            timestamp,
            location: tag.position.rounded(2),
            zone_id: tag.zone_id.clone(),
            speed: round_to(tag.speed, 2),
            // 359.95 and up would otherwise round to 360.0
            heading: normalize_heading(round_to(tag.heading, 1)),
            battery: tag.battery,
            rssi: tag.rssi,
        }
    }

    /// Check whether two updates describe the same tag state, ignoring timestamps
    pub fn same_state(&self, other: &LocationUpdate) -> bool {
        self.tag_id == other.tag_id
            && self.location == other.location
            && self.zone_id == other.zone_id
            && self.speed == other.speed
            && self.heading == other.heading
            && self.battery == other.battery
            && self.rssi == other.rssi
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
