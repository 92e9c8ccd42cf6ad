//! Simulation engine
//!
//! This module contains the SimulationEngine, the owned context holding the
//! zone registry, the tag registry and the random number stream. The engine
//! does no I/O and no scheduling: a driver calls [`SimulationEngine::tick`]
//! (or [`SimulationEngine::advance`] per tag) and reads snapshots back.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

use crate::events::{LocationUpdate, ZoneAlert, ZoneOccupancy, ZoneTransition};
use crate::facility::ZoneRegistry;
use crate::sim_event;
use crate::simulation::{apply_anomaly, MovementEngine, SimulationResult, ZoneTracker};
use crate::tag::{Tag, TagRegistry};
use crate::types::{AlertMode, AnomalyKind, SimulationConfig, TagId};

/// What one tick produced for one tag
#[derive(Debug, Clone, PartialEq)]
pub struct TagTickOutcome {
    /// Snapshot taken right after the tag moved
    pub location: LocationUpdate,
    /// Alerts surfaced under the engine's alert mode
    pub alerts: Vec<ZoneAlert>,
}

/// Everything a full tick produced, in tag order
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Engine generation after the tick
    pub generation: u64,
    /// Clock value shared by every record of the tick
    pub timestamp: DateTime<Utc>,
    /// Per-tag outcomes
    pub outcomes: Vec<TagTickOutcome>,
}

impl TickReport {
    /// All alerts of the tick in tag order
    pub fn alerts(&self) -> impl Iterator<Item = &ZoneAlert> {
        self.outcomes.iter().flat_map(|outcome| outcome.alerts.iter())
    }

    /// Number of alerts produced
    pub fn alert_count(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.alerts.len()).sum()
    }
}

/// Owned simulation state and the operations over it
#[derive(Debug)]
pub struct SimulationEngine {
    /// Configuration the engine was built from
    config: SimulationConfig,
    /// Immutable zone layout
    zones: ZoneRegistry,
    /// Every simulated tag
    tags: TagRegistry,
    /// Per-tick kinematics
    movement: MovementEngine,
    /// Zone membership tracking
    tracker: ZoneTracker,
    /// Random number generator with optional seed
    rng: StdRng,
    /// Completed full ticks
    generation: u64,
}

impl SimulationEngine {
    /// Create a new engine from a configuration
    ///
    /// The configuration is validated first. Tags start at their configured
    /// position with a random heading and the zone that position falls in.
    #[instrument(skip(config), fields(zone_count = config.zones.len(), tag_count = config.tags.len()))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let mut rng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        let zones = ZoneRegistry::from_config(&config.zones);
        let tags = TagRegistry::from_config(&config.tags, &zones, &mut rng);
        let movement = MovementEngine::from_config(&config);

        info!(
            "Simulation engine ready with {} tags across {} zones",
            tags.len(),
            zones.len()
        );

        Ok(Self { config, zones, tags, movement, tracker: ZoneTracker::new(), rng, generation: 0 })
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Zone layout
    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// All tags in registry order
    pub fn all_tags(&self) -> &[Tag] {
        self.tags.as_slice()
    }

    /// Ids of all tags in registry order
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.ids()
    }

    /// Look up a tag
    pub fn tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.get(tag_id)
    }

    /// Look up a tag for modification
    pub fn tag_mut(&mut self, tag_id: &str) -> Option<&mut Tag> {
        self.tags.get_mut(tag_id)
    }

    /// Number of simulated tags
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Number of completed full ticks
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How simultaneous exit and entry alerts are surfaced by [`tick`](Self::tick)
    pub fn alert_mode(&self) -> AlertMode {
        self.config.alert_mode
    }

    /// Advance one tag by `dt` seconds and return at most one alert
    ///
    /// When a tag leaves one zone and enters another in the same step only the
    /// entry is returned. Unknown tag ids return `None`.
    pub fn advance(&mut self, tag_id: &str, dt: f64) -> Option<ZoneAlert> {
        self.advance_at(tag_id, dt, Utc::now())?.into_primary()
    }

    /// Advance one tag with an explicit clock and return both sides of any
    /// zone change
    ///
    /// Returns `None` only for unknown tag ids.
    pub fn advance_at(&mut self, tag_id: &str, dt: f64, now: DateTime<Utc>) -> Option<ZoneTransition> {
        let tag = self.tags.get_mut(tag_id)?;
        self.movement.advance(tag, &self.zones, dt, &mut self.rng);
        let transition = self.tracker.update(tag, &self.zones, now);
        log_transition(&transition);
        Some(transition)
    }

    /// Advance every tag by `dt` seconds
    pub fn tick(&mut self, dt: f64) -> TickReport {
        self.tick_at(dt, Utc::now())
    }

    /// Advance every tag with an explicit clock
    ///
    /// Each tag moves, has its zone recomputed and is snapshotted before the
    /// next tag moves. The generation is bumped once the whole pass is done.
    pub fn tick_at(&mut self, dt: f64, now: DateTime<Utc>) -> TickReport {
        let mode = self.config.alert_mode;
        let mut outcomes = Vec::with_capacity(self.tags.len());

        for tag in self.tags.iter_mut() {
            self.movement.advance(tag, &self.zones, dt, &mut self.rng);
            let transition = self.tracker.update(tag, &self.zones, now);
            log_transition(&transition);

            outcomes.push(TagTickOutcome {
                location: LocationUpdate::from_tag_at(tag, now),
                alerts: transition.into_alerts(mode),
            });
        }

        self.generation += 1;
        let report = TickReport { generation: self.generation, timestamp: now, outcomes };
        debug!(
            generation = report.generation,
            alerts = report.alert_count(),
            "Tick complete"
        );
        report
    }

    /// Location snapshot of a tag, or `None` for unknown ids
    pub fn snapshot(&self, tag_id: &str) -> Option<LocationUpdate> {
        self.tags.get(tag_id).map(LocationUpdate::from_tag)
    }

    /// Tags currently assigned to a zone; empty for unknown zone ids
    pub fn tags_in_zone(&self, zone_id: &str) -> Vec<&Tag> {
        self.tags.in_zone(zone_id)
    }

    /// Occupancy record for a zone, or `None` for unknown zone ids
    pub fn zone_occupancy(&self, zone_id: &str) -> Option<ZoneOccupancy> {
        let zone = self.zones.get(zone_id)?;
        Some(ZoneOccupancy::new(zone.id.clone(), self.tags.in_zone(zone_id), self.generation))
    }

    /// Occupancy of every zone in configuration order
    pub fn all_occupancy(&self) -> Vec<ZoneOccupancy> {
        self.zones
            .iter()
            .map(|zone| ZoneOccupancy::new(zone.id.clone(), self.tags.in_zone(zone.id.as_str()), self.generation))
            .collect()
    }

    /// Force an anomaly onto a tag
    ///
    /// Returns `false` and changes nothing for unknown tag ids. Zone tracking
    /// is not run; the next tick reports any resulting transition.
    pub fn inject_anomaly(&mut self, tag_id: &str, kind: AnomalyKind) -> bool {
        let Some(tag) = self.tags.get_mut(tag_id) else {
            debug!(tag_id, %kind, "Anomaly target not found");
            return false;
        };

        apply_anomaly(tag, kind, self.movement.movement(), &mut self.rng);
        warn!(
            tag_id,
            %kind,
            battery = tag.battery,
            rssi = tag.rssi,
            speed = tag.speed,
            "Injected anomaly"
        );
        true
    }
}

fn log_transition(transition: &ZoneTransition) {
    if let Some(alert) = &transition.exited {
        sim_event!(info, "Zone exited", tag_id = alert.tag_id.as_str(), zone_id = alert.zone_id.as_str());
    }
    if let Some(alert) = &transition.entered {
        sim_event!(info, "Zone entered", tag_id = alert.tag_id.as_str(), zone_id = alert.zone_id.as_str());
    }
}
