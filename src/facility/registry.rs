//! Zone registry and containment lookup
//!
//! This module contains the ZoneRegistry, the ordered and immutable collection of
//! zones the simulation runs against. Configured order is significant: when zones
//! overlap, the first zone in configured order that contains a point wins.

use crate::facility::{position::Position, zone::Zone};
use crate::types::{ZoneConfig, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered collection of zones with lookup capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneRegistry {
    /// All zones, in configured order
    zones: Vec<Zone>,
    /// Quick lookup map from zone ID to index
    zone_index: HashMap<ZoneId, usize>,
}

impl ZoneRegistry {
    /// Create a new empty zone registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from zones in priority order
    ///
    /// A zone whose id is already registered is ignored; configuration
    /// validation rejects duplicates before this point.
    pub fn from_zones(zones: impl IntoIterator<Item = Zone>) -> Self {
        let mut registry = Self::new();
        for zone in zones {
            if registry.zone_index.contains_key(&zone.id) {
                continue;
            }
            registry.zone_index.insert(zone.id.clone(), registry.zones.len());
            registry.zones.push(zone);
        }
        registry
    }

    /// Build a registry from configuration entries
    pub fn from_config(configs: &[ZoneConfig]) -> Self {
        Self::from_zones(configs.iter().map(Zone::from))
    }

    /// Get a zone by ID
    pub fn get(&self, zone_id: &str) -> Option<&Zone> {
        self.zone_index.get(zone_id).and_then(|&idx| self.zones.get(idx))
    }

    /// Find the first zone, in configured order, that contains the position
    pub fn locate(&self, position: &Position) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(position))
    }

    /// ID of the zone containing the position, if any
    pub fn locate_id(&self, position: &Position) -> Option<ZoneId> {
        self.locate(position).map(|zone| zone.id.clone())
    }

    /// All zones that contain the position, in configured order
    pub fn containing(&self, position: &Position) -> Vec<&Zone> {
        self.zones.iter().filter(|zone| zone.contains(position)).collect()
    }

    /// All zones in configured order
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// All zones as a slice
    pub fn as_slice(&self) -> &[Zone] {
        &self.zones
    }

    /// Number of zones
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the registry has no zones
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundsConfig;

    fn bounds(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> BoundsConfig {
        BoundsConfig { x_min, x_max, y_min, y_max, z_min: 0.0, z_max: 5.0 }
    }

    fn registry() -> ZoneRegistry {
        ZoneRegistry::from_zones(vec![
            Zone::new("west", "West Hall", bounds(0.0, 20.0, 0.0, 20.0)),
            Zone::new("east", "East Hall", bounds(20.0, 40.0, 0.0, 20.0)),
            Zone::new("atrium", "Atrium", bounds(10.0, 30.0, 5.0, 15.0)),
        ])
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("east").unwrap().name, "East Hall");
        assert!(registry.get("north").is_none());
    }

    #[test]
    fn test_locate_first_match_wins() {
        let registry = registry();

        // x = 20 is on the shared wall of west and east; west is configured first
        assert_eq!(registry.locate_id(&Position::new(20.0, 10.0, 1.0)).unwrap().as_str(), "west");

        // Atrium overlaps both halls but is configured last
        assert_eq!(registry.locate_id(&Position::new(25.0, 10.0, 1.0)).unwrap().as_str(), "east");
        assert_eq!(registry.containing(&Position::new(25.0, 10.0, 1.0)).len(), 2);
    }

    #[test]
    fn test_locate_outside_all_zones() {
        let registry = registry();
        assert!(registry.locate(&Position::new(100.0, 100.0, 0.0)).is_none());
        assert!(registry.containing(&Position::new(-5.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let registry = ZoneRegistry::from_zones(vec![
            Zone::new("a", "First", bounds(0.0, 1.0, 0.0, 1.0)),
            Zone::new("a", "Second", bounds(5.0, 6.0, 5.0, 6.0)),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().name, "First");
    }

    #[test]
    fn test_iteration_preserves_order() {
        let reg = registry();
        let ids: Vec<&str> = reg.iter().map(|z| z.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["west", "east", "atrium"]);
    }
}
