//! Per-tick kinematic update
//!
//! This module contains the MovementEngine, which advances one tag's telemetry
//! and kinematic state by a fixed elapsed time. Each tick runs, in order:
//!
//! 1. battery drain (rare, stochastic)
//! 2. RSSI noise, clamped to [-90, -40] dBm
//! 3. motion trigger by tag type
//! 4. kinematic step: heading and speed random walk, planar displacement
//! 5. boundary reflection against the zone that held the tag before the step
//! 6. vertical jitter for worn devices
//!
//! Steps 4 to 6 only run when the motion trigger fires. The update is
//! deterministic for a given random number stream.

use rand::Rng;

use crate::facility::ZoneRegistry;
use crate::tag::{MotionProfile, Tag};
use crate::types::{signal, MovementConfig, NoiseConfig, SimulationConfig};

/// Highest a worn device is allowed to drift, in meters
pub const MAX_DEVICE_HEIGHT: f64 = 2.0;

/// Normalize a heading in degrees to [0, 360)
pub fn normalize_heading(heading: f64) -> f64 {
    let normalized = heading.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Uniform sample from [-limit, limit], or zero when the limit is zero
fn symmetric<R: Rng + ?Sized>(rng: &mut R, limit: f64) -> f64 {
    if limit > 0.0 {
        rng.gen_range(-limit..=limit)
    } else {
        0.0
    }
}

/// Advances tag kinematics and telemetry one tick at a time
#[derive(Debug, Clone)]
pub struct MovementEngine {
    /// Kinematic limits
    movement: MovementConfig,
    /// Telemetry noise parameters
    noise: NoiseConfig,
}

impl MovementEngine {
    /// Create a new movement engine
    pub fn new(movement: MovementConfig, noise: NoiseConfig) -> Self {
        Self { movement, noise }
    }

    /// Create a movement engine from the simulation configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.movement.clone(), config.noise.clone())
    }

    /// Kinematic limits in use
    pub fn movement(&self) -> &MovementConfig {
        &self.movement
    }

    /// Motion profile for a tag type under this engine's limits
    pub fn profile(&self, tag: &Tag) -> MotionProfile {
        MotionProfile::for_type(tag.tag_type, &self.movement)
    }

    /// Advance one tag by `dt` seconds
    ///
    /// Mutates position, heading, speed, battery and rssi in place. Zone
    /// membership is not touched here; see
    /// [`ZoneTracker`](crate::simulation::ZoneTracker).
    pub fn advance<R: Rng + ?Sized>(&self, tag: &mut Tag, zones: &ZoneRegistry, dt: f64, rng: &mut R) {
        self.drain_battery(tag, rng);
        self.perturb_signal(tag, rng);

        let profile = self.profile(tag);
        let triggered = profile.always_moves() || rng.gen::<f64>() < profile.trigger_probability;
        if triggered {
            self.step(tag, zones, dt, &profile, rng);
        }
    }

    fn drain_battery<R: Rng + ?Sized>(&self, tag: &mut Tag, rng: &mut R) {
        if rng.gen::<f64>() < self.noise.battery_drain_probability {
            tag.battery = tag.battery.saturating_sub(1);
        }
    }

    fn perturb_signal<R: Rng + ?Sized>(&self, tag: &mut Tag, rng: &mut R) {
        let jitter = self.noise.rssi_jitter;
        let delta = if jitter > 0 { rng.gen_range(-jitter..=jitter) } else { 0 };
        tag.rssi = tag.rssi.saturating_add(delta).clamp(signal::RSSI_MIN, signal::RSSI_MAX);
    }

    fn step<R: Rng + ?Sized>(
        &self,
        tag: &mut Tag,
        zones: &ZoneRegistry,
        dt: f64,
        profile: &MotionProfile,
        rng: &mut R,
    ) {
        tag.heading = normalize_heading(tag.heading + symmetric(rng, self.movement.turn_rate) * dt);
        tag.speed = (tag.speed + symmetric(rng, self.movement.acceleration) * dt).clamp(0.0, profile.max_speed);

        let heading_rad = tag.heading.to_radians();
        let mut new_x = tag.position.x + tag.speed * heading_rad.cos() * dt;
        let mut new_y = tag.position.y + tag.speed * heading_rad.sin() * dt;

        // Walls belong to the zone the tag was in before moving
        if let Some(zone) = zones.locate(&tag.position) {
            if new_x <= zone.x_min || new_x >= zone.x_max {
                tag.heading = normalize_heading(180.0 - tag.heading);
                new_x = new_x.clamp(zone.x_min, zone.x_max);
            }
            if new_y <= zone.y_min || new_y >= zone.y_max {
                tag.heading = normalize_heading(-tag.heading);
                new_y = new_y.clamp(zone.y_min, zone.y_max);
            }
        }

        tag.position.x = new_x;
        tag.position.y = new_y;

        if profile.vertical_jitter && rng.gen::<f64>() < self.noise.vertical_jitter_probability {
            let z = tag.position.z + symmetric(rng, self.noise.vertical_jitter);
            tag.position.z = z.clamp(0.0, MAX_DEVICE_HEIGHT);
        }
    }
}
