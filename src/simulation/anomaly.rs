//! Synthetic fault injection
//!
//! Anomalies force a tag into a state that downstream consumers should flag.
//! They are applied directly to the tag and bypass zone tracking; the next
//! tick picks up any resulting zone change.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::tag::Tag;
use crate::types::{AnomalyKind, MovementConfig};

/// Battery percentage range forced by [`AnomalyKind::LowBattery`]
pub const LOW_BATTERY_RANGE: RangeInclusive<u8> = 5..=15;

/// RSSI range in dBm forced by [`AnomalyKind::WeakSignal`]
pub const WEAK_SIGNAL_RANGE: RangeInclusive<i32> = -85..=-80;

/// Multiple of the global maximum speed forced by [`AnomalyKind::FastMovement`]
pub const FAST_MOVEMENT_FACTOR: f64 = 2.0;

/// Planar coordinate forced by [`AnomalyKind::OutOfBounds`]
pub const OUT_OF_BOUNDS_COORDINATE: f64 = -10.0;

/// Apply an anomaly to a tag
pub fn apply_anomaly<R: Rng + ?Sized>(tag: &mut Tag, kind: AnomalyKind, movement: &MovementConfig, rng: &mut R) {
    match kind {
        AnomalyKind::LowBattery => tag.battery = rng.gen_range(LOW_BATTERY_RANGE),
        AnomalyKind::WeakSignal => tag.rssi = rng.gen_range(WEAK_SIGNAL_RANGE),
        AnomalyKind::FastMovement => {
            // Zero max speed still has to produce an over-limit reading
            tag.speed = (movement.max_speed * FAST_MOVEMENT_FACTOR).max(f64::EPSILON);
        }
        AnomalyKind::OutOfBounds => {
            tag.position.x = OUT_OF_BOUNDS_COORDINATE;
            tag.position.y = OUT_OF_BOUNDS_COORDINATE;
        }
    }
}
