//! Enumeration types for the RTLS simulator
//!
//! This module contains the enumeration types used throughout the simulation:
//! tag types, zone event types, anomaly kinds and the alert surfacing mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Types of tracked tags
///
/// Each type selects a motion profile (see [`crate::tag::MotionProfile`]).
/// Configuration strings that do not name a known type deserialize as
/// [`TagType::Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TagType {
    /// Worn badge; moves every tick at walking pace with height jitter
    Person,
    /// Forklift, cart or similar; moves every tick at the global max speed
    Vehicle,
    /// Equipment that is mostly stationary and occasionally relocated
    Asset,
}

impl TagType {
    /// Parse a configured type string, falling back to `Person` for unknown values
    pub fn from_config_str(s: &str) -> Self {
        s.parse().unwrap_or(TagType::Person)
    }
}

impl Default for TagType {
    fn default() -> Self {
        TagType::Person
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagType::Person => write!(f, "person"),
            TagType::Vehicle => write!(f, "vehicle"),
            TagType::Asset => write!(f, "asset"),
        }
    }
}

impl FromStr for TagType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "person" => Ok(TagType::Person),
            "vehicle" => Ok(TagType::Vehicle),
            "asset" => Ok(TagType::Asset),
            _ => Err(format!("Unknown tag type: {}", s)),
        }
    }
}

impl From<String> for TagType {
    fn from(s: String) -> Self {
        Self::from_config_str(&s)
    }
}

/// Direction of a zone membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneEventType {
    /// Tag moved into the zone
    Entered,
    /// Tag left the zone
    Exited,
}

impl fmt::Display for ZoneEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneEventType::Entered => write!(f, "entered"),
            ZoneEventType::Exited => write!(f, "exited"),
        }
    }
}

/// Synthetic faults that can be forced onto a tag for testing consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Battery dropped to a low value (5-15%)
    LowBattery,
    /// RSSI dropped to a weak value (-85 to -80 dBm)
    WeakSignal,
    /// Speed forced above the configured maximum
    FastMovement,
    /// Position forced to a negative, out-of-building coordinate
    OutOfBounds,
}

impl AnomalyKind {
    /// All anomaly kinds, in declaration order
    pub const ALL: [AnomalyKind; 4] = [
        AnomalyKind::LowBattery,
        AnomalyKind::WeakSignal,
        AnomalyKind::FastMovement,
        AnomalyKind::OutOfBounds,
    ];
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::LowBattery => write!(f, "low_battery"),
            AnomalyKind::WeakSignal => write!(f, "weak_signal"),
            AnomalyKind::FastMovement => write!(f, "fast_movement"),
            AnomalyKind::OutOfBounds => write!(f, "out_of_bounds"),
        }
    }
}

impl FromStr for AnomalyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "low_battery" => Ok(AnomalyKind::LowBattery),
            "weak_signal" => Ok(AnomalyKind::WeakSignal),
            "fast_movement" => Ok(AnomalyKind::FastMovement),
            "out_of_bounds" => Ok(AnomalyKind::OutOfBounds),
            _ => Err(format!("Unknown anomaly kind: {}", s)),
        }
    }
}

/// How zone transitions are surfaced to the caller
///
/// A tag that leaves one zone and enters another within a single tick produces
/// both an exit and an entry event. `Collapse` reports only the entry (the exit
/// is computed and dropped); `Both` reports the exit followed by the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertMode {
    /// At most one alert per tag per tick; entry overwrites exit
    Collapse,
    /// Exit and entry alerts are both surfaced
    Both,
}

impl Default for AlertMode {
    fn default() -> Self {
        AlertMode::Collapse
    }
}

impl fmt::Display for AlertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertMode::Collapse => write!(f, "collapse"),
            AlertMode::Both => write!(f, "both"),
        }
    }
}

impl FromStr for AlertMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "collapse" | "single" => Ok(AlertMode::Collapse),
            "both" => Ok(AlertMode::Both),
            _ => Err(format!("Unknown alert mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_type_parsing() {
        assert_eq!("person".parse::<TagType>().unwrap(), TagType::Person);
        assert_eq!("Vehicle".parse::<TagType>().unwrap(), TagType::Vehicle);
        assert_eq!("ASSET".parse::<TagType>().unwrap(), TagType::Asset);
        assert!("drone".parse::<TagType>().is_err());
    }

    #[test]
    fn test_unknown_tag_type_falls_back_to_person() {
        assert_eq!(TagType::from_config_str("visitor"), TagType::Person);

        let parsed: TagType = serde_json::from_str("\"robot\"").unwrap();
        assert_eq!(parsed, TagType::Person);

        let parsed: TagType = serde_json::from_str("\"vehicle\"").unwrap();
        assert_eq!(parsed, TagType::Vehicle);
    }

    #[test]
    fn test_tag_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TagType::Asset).unwrap(), "\"asset\"");
    }

    #[test]
    fn test_zone_event_type_wire_format() {
        assert_eq!(serde_json::to_string(&ZoneEventType::Entered).unwrap(), "\"entered\"");
        assert_eq!(serde_json::to_string(&ZoneEventType::Exited).unwrap(), "\"exited\"");
    }

    #[test]
    fn test_anomaly_kind_round_trips_through_display() {
        for kind in AnomalyKind::ALL {
            assert_eq!(kind.to_string().parse::<AnomalyKind>().unwrap(), kind);
        }
        assert_eq!("weak-signal".parse::<AnomalyKind>().unwrap(), AnomalyKind::WeakSignal);
        assert!("meltdown".parse::<AnomalyKind>().is_err());
    }

    #[test]
    fn test_alert_mode_default_is_collapse() {
        assert_eq!(AlertMode::default(), AlertMode::Collapse);
        assert_eq!("both".parse::<AlertMode>().unwrap(), AlertMode::Both);
    }
}
