//! Core Tag struct and state management
//!
//! This module contains the Tag struct: the mutable state of one tracked object.
//! Tags are owned by the [`TagRegistry`](crate::tag::TagRegistry) inside the
//! simulation engine and mutated in place every tick.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::facility::{Position, ZoneRegistry};
use crate::types::{signal, TagConfig, TagId, TagType, ZoneId};

/// Represents a tracked RTLS tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier for the tag
    pub id: TagId,
    /// Human-readable name (wearer or asset label)
    pub name: String,
    /// Tag type, selects the motion profile
    #[serde(rename = "type")]
    pub tag_type: TagType,
    /// Current position
    pub position: Position,
    /// Current speed in m/s
    pub speed: f64,
    /// Heading in degrees, normalized to [0, 360)
    pub heading: f64,
    /// Battery charge in percent (0-100)
    pub battery: u8,
    /// Received signal strength in dBm, within [-90, -40]
    pub rssi: i32,
    /// Zone recorded on the last tracker update, if any
    pub zone_id: Option<ZoneId>,
    /// Time of the most recent simulation tick
    pub last_update: Option<DateTime<Utc>>,
}

impl Tag {
    /// Create a new stationary tag heading east with full signal defaults
    pub fn new(
        id: impl Into<TagId>,
        name: impl Into<String>,
        tag_type: TagType,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tag_type,
            position,
            speed: 0.0,
            heading: 0.0,
            battery: 100,
            rssi: signal::RSSI_INITIAL,
            zone_id: None,
            last_update: None,
        }
    }

    /// Create a tag from configuration
    ///
    /// The heading is drawn uniformly from [0, 360) and the initial zone is the
    /// containment of the configured starting position.
    pub fn from_config<R: Rng + ?Sized>(config: &TagConfig, zones: &ZoneRegistry, rng: &mut R) -> Self {
        let mut tag = Self::new(
            config.id.as_str(),
            config.name.clone(),
            config.tag_type,
            config.initial_position,
        );
        tag.battery = config.battery.min(100);
        tag.heading = rng.gen_range(0.0..360.0);
        tag.zone_id = zones.locate_id(&tag.position);
        tag
    }

    /// Builder-style battery override
    pub fn with_battery(mut self, battery: u8) -> Self {
        self.battery = battery.min(100);
        self
    }

    /// Builder-style kinematics override
    pub fn with_motion(mut self, speed: f64, heading: f64) -> Self {
        self.speed = speed;
        self.heading = heading;
        self
    }

    /// Check if the tag is currently assigned to a zone
    pub fn is_in_zone(&self) -> bool {
        self.zone_id.is_some()
    }

    /// Check if the tag is currently assigned to the given zone
    pub fn is_in(&self, zone_id: &str) -> bool {
        self.zone_id.as_ref().is_some_and(|id| id.as_str() == zone_id)
    }

    /// Check if the tag is moving
    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }
}
