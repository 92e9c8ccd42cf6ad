//! Outward-facing records
//!
//! This module holds the records handed to the publish boundary: location
//! snapshots, zone transition alerts, zone occupancy and system status.
//!
//! # Overview
//!
//! - **LocationUpdate**: rounded snapshot of a tag's position and telemetry
//! - **ZoneAlert** / **ZoneTransition**: membership changes detected on a tick
//! - **ZoneOccupancy**: tags currently assigned to a zone
//! - **SystemStatus**: run-level status published on start and stop
//!
//! # Usage Example
//!
//! ```rust
//! use rtls_simulator::events::*;
//! use rtls_simulator::facility::Position;
//! use rtls_simulator::tag::Tag;
//! use rtls_simulator::types::TagType;
//!
//! let tag = Tag::new("tag_001", "John Doe", TagType::Person, Position::new(1.234, 5.678, 1.0));
//! let update = LocationUpdate::from_tag(&tag);
//! assert_eq!(update.location.x, 1.23);
//! ```

pub mod location_update;
pub mod occupancy;
pub mod status;
pub mod zone_alert;

// Re-export all public types for convenience
pub use location_update::LocationUpdate;
pub use occupancy::{Occupant, ZoneOccupancy};
pub use status::SystemStatus;
pub use zone_alert::{ZoneAlert, ZoneTransition};
