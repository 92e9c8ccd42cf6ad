//! Motion profiles by tag type
//!
//! Each [`TagType`] maps to a profile carrying its trigger probability and
//! speed ceiling as data. Adding a tag type forces a new arm here.

use crate::types::{MovementConfig, TagType};
use serde::{Deserialize, Serialize};

/// How a tag type moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Probability that the tag executes a kinematic step on a given tick
    pub trigger_probability: f64,
    /// Speed ceiling in m/s
    pub max_speed: f64,
    /// Whether the device height wanders (worn devices)
    pub vertical_jitter: bool,
}

impl MotionProfile {
    /// Resolve the profile for a tag type under the given movement limits
    pub fn for_type(tag_type: TagType, movement: &MovementConfig) -> Self {
        match tag_type {
            TagType::Asset => Self {
                trigger_probability: movement.asset_move_probability,
                max_speed: movement.asset_max_speed,
                vertical_jitter: false,
            },
            TagType::Vehicle => Self {
                trigger_probability: 1.0,
                max_speed: movement.max_speed,
                vertical_jitter: false,
            },
            TagType::Person => Self {
                trigger_probability: 1.0,
                max_speed: movement.person_max_speed,
                vertical_jitter: true,
            },
        }
    }

    /// Whether this profile moves on every tick
    pub fn always_moves(&self) -> bool {
        self.trigger_probability >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let movement = MovementConfig::default();

        let asset = MotionProfile::for_type(TagType::Asset, &movement);
        assert_eq!(asset.trigger_probability, 0.01);
        assert_eq!(asset.max_speed, 1.0);
        assert!(!asset.always_moves());

        let vehicle = MotionProfile::for_type(TagType::Vehicle, &movement);
        assert!(vehicle.always_moves());
        assert_eq!(vehicle.max_speed, movement.max_speed);
        assert!(!vehicle.vertical_jitter);

        let person = MotionProfile::for_type(TagType::Person, &movement);
        assert!(person.always_moves());
        assert_eq!(person.max_speed, 2.0);
        assert!(person.vertical_jitter);
    }

    #[test]
    fn test_vehicle_tracks_global_max_speed() {
        let movement = MovementConfig { max_speed: 12.0, ..Default::default() };
        assert_eq!(MotionProfile::for_type(TagType::Vehicle, &movement).max_speed, 12.0);
    }
}
