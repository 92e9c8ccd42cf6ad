//! Zone volumes and containment
//!
//! A zone is a named axis-aligned box. Containment is inclusive on all six
//! bounds, so a point on a face, edge or corner is inside.

use crate::facility::position::Position;
use crate::types::{BoundsConfig, ZoneConfig, ZoneId};
use serde::{Deserialize, Serialize};

/// Represents a rectangular region of the building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique identifier for the zone
    pub id: ZoneId,
    /// Human-readable name of the zone
    pub name: String,
    /// Lower x bound
    pub x_min: f64,
    /// Upper x bound
    pub x_max: f64,
    /// Lower y bound
    pub y_min: f64,
    /// Upper y bound
    pub y_max: f64,
    /// Lower z bound
    pub z_min: f64,
    /// Upper z bound
    pub z_max: f64,
}

impl Zone {
    /// Create a new zone from its id, name and bounds
    pub fn new(id: impl Into<ZoneId>, name: impl Into<String>, bounds: BoundsConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x_min: bounds.x_min,
            x_max: bounds.x_max,
            y_min: bounds.y_min,
            y_max: bounds.y_max,
            z_min: bounds.z_min,
            z_max: bounds.z_max,
        }
    }

    /// Check if a position is within this zone (all bounds inclusive)
    pub fn contains(&self, position: &Position) -> bool {
        (self.x_min..=self.x_max).contains(&position.x)
            && (self.y_min..=self.y_max).contains(&position.y)
            && (self.z_min..=self.z_max).contains(&position.z)
    }

    /// Center point of the zone volume
    pub fn center(&self) -> Position {
        Position::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
            (self.z_min + self.z_max) / 2.0,
        )
    }

    /// Floor area in square meters
    pub fn floor_area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
}

impl From<&ZoneConfig> for Zone {
    fn from(config: &ZoneConfig) -> Self {
        Zone::new(config.id.as_str(), config.name.clone(), config.bounds)
    }
}
