//! Tracked tag modeling
//!
//! This module contains the tag entity, its type-dependent motion profile and the
//! registry that owns every tag during a run.
//!
//! # Usage Example
//!
//! ```rust
//! use rtls_simulator::facility::Position;
//! use rtls_simulator::tag::*;
//! use rtls_simulator::types::{MovementConfig, TagType};
//!
//! let tag = Tag::new("tag_001", "John Doe", TagType::Person, Position::new(10.0, 5.0, 1.2));
//! let profile = MotionProfile::for_type(tag.tag_type, &MovementConfig::default());
//! assert_eq!(profile.max_speed, 2.0);
//!
//! let mut registry = TagRegistry::new();
//! registry.insert(tag);
//! assert!(registry.get("tag_001").is_some());
//! ```

pub mod motion;
pub mod registry;
#[allow(clippy::module_inception)]
pub mod tag;

// Re-export all public types for convenience
pub use motion::MotionProfile;
pub use registry::TagRegistry;
pub use tag::Tag;
