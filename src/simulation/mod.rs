//! Simulation engine and driver
//!
//! This module contains the tick pipeline, the engine that owns all simulated
//! state, the runner that publishes its output, statistics collection and
//! error handling.
//!
//! # Overview
//!
//! - **MovementEngine**: per-tick telemetry noise and kinematics for one tag
//! - **ZoneTracker**: zone membership updates and transition alerts
//! - **SimulationEngine**: owned tag/zone state with the advance, snapshot and
//!   occupancy operations
//! - **SimulationRunner**: start, tick and stop against a publisher
//! - **SimulationStatistics**: run counters and summaries
//! - **SimulationError**: error handling for engine construction and runs
//!
//! # Usage Example
//!
//! ```rust
//! use rtls_simulator::simulation::*;
//! use rtls_simulator::transport::MemoryPublisher;
//! use rtls_simulator::types::SimulationConfig;
//!
//! let config = SimulationConfig { seed: Some(1), ..Default::default() };
//!
//! // Drive the engine directly
//! let mut engine = SimulationEngine::new(config.clone()).unwrap();
//! let _alert = engine.advance("tag_001", 1.0);
//! let snapshot = engine.snapshot("tag_001").unwrap();
//! assert_eq!(snapshot.tag_id.as_str(), "tag_001");
//!
//! // Or let the runner publish everything
//! let mut runner = SimulationRunner::new(config, MemoryPublisher::new()).unwrap().with_pacing(false);
//! runner.run(Some(3)).unwrap();
//! assert_eq!(runner.statistics().ticks, 3);
//! ```

pub mod anomaly;
pub mod engine;
pub mod error;
pub mod logging;
pub mod movement;
pub mod runner;
pub mod statistics;
pub mod tracker;

// Re-export all public types for convenience
pub use anomaly::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use movement::*;
pub use runner::*;
pub use statistics::*;
pub use tracker::*;
