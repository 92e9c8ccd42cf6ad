//! Zone membership tracking
//!
//! The tracker compares a tag's recorded zone with the zone its current position
//! falls in and reports the difference as a [`ZoneTransition`].

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::events::{ZoneAlert, ZoneTransition};
use crate::facility::ZoneRegistry;
use crate::tag::Tag;
use crate::types::ZoneEventType;

/// Detects zone entries and exits after movement
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneTracker;

impl ZoneTracker {
    /// Create a new tracker
    pub fn new() -> Self {
        Self
    }

    /// Recompute a tag's zone and record the update time
    ///
    /// `tag.zone_id` and `tag.last_update` are always refreshed. The returned
    /// transition is empty when the zone did not change.
    pub fn update(&self, tag: &mut Tag, zones: &ZoneRegistry, now: DateTime<Utc>) -> ZoneTransition {
        let current = zones.locate(&tag.position);
        let mut transition = ZoneTransition::none();

        if current.map(|zone| &zone.id) != tag.zone_id.as_ref() {
            // A previous zone missing from the registry has nothing to exit
            if let Some(previous) = tag.zone_id.as_ref().and_then(|id| zones.get(id.as_str())) {
                transition.exited = Some(ZoneAlert::new(tag, previous, ZoneEventType::Exited, now));
            }
            if let Some(zone) = current {
                transition.entered = Some(ZoneAlert::new(tag, zone, ZoneEventType::Entered, now));
            }

            debug!(
                tag_id = %tag.id,
                from = ?tag.zone_id,
                to = ?current.map(|zone| &zone.id),
                "Zone membership changed"
            );
            tag.zone_id = current.map(|zone| zone.id.clone());
        }

        tag.last_update = Some(now);
        transition
    }
}
