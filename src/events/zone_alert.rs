//! Zone transition alerts
//!
//! This module contains the ZoneAlert record and the ZoneTransition produced by
//! the zone membership tracker for a single tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::facility::Zone;
use crate::tag::Tag;
use crate::types::{AlertMode, TagId, ZoneEventType, ZoneId};

/// A tag entered or left a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAlert {
    /// Tag that moved
    pub tag_id: TagId,
    /// Tag display name
    pub tag_name: String,
    /// When the transition was detected
    pub timestamp: DateTime<Utc>,
    /// Entered or exited
    pub event_type: ZoneEventType,
    /// Zone that was entered or exited
    pub zone_id: ZoneId,
    /// Zone display name
    pub zone_name: String,
}

impl ZoneAlert {
    /// Create an alert for a tag and zone
    pub fn new(tag: &Tag, zone: &Zone, event_type: ZoneEventType, timestamp: DateTime<Utc>) -> Self {
        Self {
            tag_id: tag.id.clone(),
            tag_name: tag.name.clone(),
            timestamp,
            event_type,
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
        }
    }

    /// Check if this is an entry alert
    pub fn is_entry(&self) -> bool {
        self.event_type == ZoneEventType::Entered
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Outcome of one zone membership update
///
/// A change of zone yields up to two logical events: leaving the old zone and
/// entering the new one. Either side is absent when the tag was, or now is,
/// outside every zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneTransition {
    /// Alert for the zone that was left
    pub exited: Option<ZoneAlert>,
    /// Alert for the zone that was entered
    pub entered: Option<ZoneAlert>,
}

impl ZoneTransition {
    /// A tick without a membership change
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether any membership change occurred
    pub fn is_transition(&self) -> bool {
        self.exited.is_some() || self.entered.is_some()
    }

    /// The single alert surfaced under the collapsing contract: entry wins over exit
    pub fn primary(&self) -> Option<&ZoneAlert> {
        self.entered.as_ref().or(self.exited.as_ref())
    }

    /// Consume into the single collapsed alert
    pub fn into_primary(self) -> Option<ZoneAlert> {
        self.entered.or(self.exited)
    }

    /// Consume into the alerts surfaced under the given mode
    ///
    /// `Both` yields the exit before the entry.
    pub fn into_alerts(self, mode: AlertMode) -> Vec<ZoneAlert> {
        match mode {
            AlertMode::Collapse => self.into_primary().into_iter().collect(),
            AlertMode::Both => self.exited.into_iter().chain(self.entered).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::Position;
    use crate::types::{BoundsConfig, TagType};

    fn zone(id: &str) -> Zone {
        Zone::new(
            id,
            id.to_uppercase(),
            BoundsConfig { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0, z_min: 0.0, z_max: 1.0 },
        )
    }

    fn transition() -> ZoneTransition {
        let tag = Tag::new("tag_001", "Walker", TagType::Person, Position::default());
        let now = Utc::now();
        ZoneTransition {
            exited: Some(ZoneAlert::new(&tag, &zone("a"), ZoneEventType::Exited, now)),
            entered: Some(ZoneAlert::new(&tag, &zone("b"), ZoneEventType::Entered, now)),
        }
    }

    #[test]
    fn test_primary_prefers_entry() {
        let t = transition();
        assert!(t.is_transition());
        assert_eq!(t.primary().unwrap().zone_id.as_str(), "b");
        assert!(t.into_primary().unwrap().is_entry());
    }

    #[test]
    fn test_primary_falls_back_to_exit() {
        let mut t = transition();
        t.entered = None;
        assert_eq!(t.primary().unwrap().event_type, ZoneEventType::Exited);
    }

    #[test]
    fn test_into_alerts_by_mode() {
        let collapsed = transition().into_alerts(AlertMode::Collapse);
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].event_type, ZoneEventType::Entered);

        let both = transition().into_alerts(AlertMode::Both);
        assert_eq!(both.len(), 2);
        assert_eq!(both[0].event_type, ZoneEventType::Exited);
        assert_eq!(both[1].event_type, ZoneEventType::Entered);

        assert!(ZoneTransition::none().into_alerts(AlertMode::Both).is_empty());
    }

    #[test]
    fn test_alert_json_fields() {
        let alert = transition().into_primary().unwrap();
        let json: serde_json::Value = serde_json::from_str(&alert.to_json().unwrap()).unwrap();
        assert_eq!(json["tag_name"], "Walker");
        assert_eq!(json["event_type"], "entered");
        assert_eq!(json["zone_name"], "B");
    }
}
