//! RTLS Simulator
//!
//! A mock real-time location system that moves tracked tags (people, vehicles
//! and assets) through a building made of rectangular zones and reports where
//! they are.
//!
//! # Overview
//!
//! Each tick advances every tag: telemetry noise, a bounded random walk of
//! heading and speed, reflection off the walls of the zone the tag is in, and
//! a zone membership update that may raise entry or exit alerts. The engine is
//! an owned context with no I/O; a runner drives it at a fixed rate and hands
//! serialized records to a publisher.
//!
//! ## Key Features
//!
//! - **Type-dependent motion**: people, vehicles and assets move differently
//! - **Zone tracking**: entry and exit alerts, occupancy per zone
//! - **Telemetry noise**: battery drain and RSSI jitter
//! - **Fault injection**: low battery, weak signal, fast movement, out of bounds
//! - **Reproducible runs**: seeded random number stream
//! - **Pluggable delivery**: JSON lines to stdout or a file, or in memory
//!
//! ## Quick Start
//!
//! ```rust
//! use rtls_simulator::*;
//!
//! let config = SimulationConfig { seed: Some(42), ..Default::default() };
//! let mut engine = SimulationEngine::new(config)?;
//!
//! let report = engine.tick(1.0);
//! for outcome in &report.outcomes {
//!     println!("{} at ({}, {})", outcome.location.tag_id, outcome.location.location.x, outcome.location.location.y);
//! }
//!
//! let lobby = engine.zone_occupancy("zone_lobby").unwrap();
//! println!("{} tags in the lobby", lobby.tag_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums and configuration
//! - [`facility`]: positions, zones and the zone registry
//! - [`tag`]: tags, motion profiles and the tag registry
//! - [`events`]: location updates, zone alerts, occupancy and status records
//! - [`simulation`]: movement, zone tracking, the engine and the runner
//! - [`transport`]: the publish boundary and its sinks
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Facility   │    │     Tag     │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Position    │◄───┤ Tag         │
//! │ Enums       │    │ Zone        │    │ Motion      │
//! │ Config      │    │ Registry    │    │ Registry    │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Transport  │    │   Events    │    │ Simulation  │
//! │             │    │             │    │             │
//! │ Publisher   │◄───┤ Location    │◄───┤ Engine      │
//! │ JSON lines  │    │ Alerts      │    │ Runner      │
//! │ Memory      │    │ Occupancy   │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod facility;
pub mod simulation;
pub mod tag;
pub mod transport;
pub mod types;

// Core types and identifiers
pub use types::{
    AlertMode,
    AnomalyKind,
    ConfigValidationError,
    // Identifiers
    TagId,
    // Enums
    TagType,
    ZoneEventType,
    ZoneId,
    // Configuration
    SimulationConfig,
};

// Facility and tag types
pub use facility::{Position, Zone, ZoneRegistry};
pub use tag::{MotionProfile, Tag, TagRegistry};

// Event records
pub use events::{LocationUpdate, SystemStatus, ZoneAlert, ZoneOccupancy, ZoneTransition};

// Simulation types and functionality
pub use simulation::{
    SimulationEngine, SimulationError, SimulationResult, SimulationRunner, SimulationStatistics, TickReport,
};

// Publish boundary
pub use transport::{JsonLinesPublisher, MemoryPublisher, Publisher, TransportError};
