//! Core types and identifiers for the RTLS simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: string newtypes for tag and zone ids
//! - **Enums**: tag types, zone event types, anomaly kinds, alert mode
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use rtls_simulator::types::*;
//!
//! let tag_id = TagId::new("tag_001");
//! let zone_id = ZoneId::new("zone_lobby");
//! assert_eq!(tag_id.as_str(), "tag_001");
//!
//! let kind: AnomalyKind = "weak_signal".parse().unwrap();
//! assert_eq!(kind, AnomalyKind::WeakSignal);
//!
//! let config = SimulationConfig {
//!     update_interval: 0.5,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! # let _ = zone_id;
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
