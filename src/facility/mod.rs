//! Building geometry: positions, zones and the zone registry
//!
//! # Overview
//!
//! - **Position**: a point in building space with Euclidean distance
//! - **Zone**: a named axis-aligned box with inclusive containment
//! - **ZoneRegistry**: ordered zone list with first-match containment lookup
//!
//! # Usage Example
//!
//! ```rust
//! use rtls_simulator::facility::*;
//! use rtls_simulator::types::BoundsConfig;
//!
//! let zone = Zone::new(
//!     "zone_lobby",
//!     "Main Lobby",
//!     BoundsConfig { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0, z_min: 0.0, z_max: 5.0 },
//! );
//! assert!(zone.contains(&Position::new(10.0, 10.0, 5.0)));
//!
//! let registry = ZoneRegistry::from_zones(vec![zone]);
//! assert_eq!(registry.locate_id(&Position::new(1.0, 1.0, 0.0)).unwrap().as_str(), "zone_lobby");
//! ```

pub mod position;
pub mod registry;
pub mod zone;

// Re-export all public types for convenience
pub use position::{distance, round_to, Position};
pub use registry::ZoneRegistry;
pub use zone::Zone;
