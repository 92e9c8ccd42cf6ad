//! 3D positions in building coordinates
//!
//! Coordinates are in meters. Positions are unbounded; zones constrain the legal
//! operating range by convention only.

use serde::{Deserialize, Serialize};

/// A point in building space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate in meters
    pub x: f64,
    /// North-south coordinate in meters
    pub y: f64,
    /// Height above floor in meters
    #[serde(default)]
    pub z: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        distance(self, other)
    }

    /// Copy of this position with every coordinate rounded to `decimals` places
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            x: round_to(self.x, decimals),
            y: round_to(self.y, decimals),
            z: round_to(self.z, decimals),
        }
    }
}

/// Euclidean distance between two positions in 3-space
pub fn distance(a: &Position, b: &Position) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_3_4_5() {
        let origin = Position::new(0.0, 0.0, 0.0);
        assert_eq!(origin.distance_to(&Position::new(3.0, 4.0, 0.0)), 5.0);
        assert_eq!(origin.distance_to(&Position::new(0.0, 0.0, 5.0)), 5.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Position::new(1.5, -2.0, 0.3);
        let b = Position::new(-4.0, 7.25, 1.9);
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_rounding() {
        let p = Position::new(1.23456, -7.891, 0.005).rounded(2);
        assert_eq!(p.x, 1.23);
        assert_eq!(p.y, -7.89);
        assert_eq!(round_to(123.456, 1), 123.5);
    }

    #[test]
    fn test_z_defaults_when_missing() {
        let p: Position = serde_json::from_str(r#"{"x": 1.0, "y": 2.0}"#).unwrap();
        assert_eq!(p, Position::new(1.0, 2.0, 0.0));
    }
}
