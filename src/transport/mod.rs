//! Publish boundary
//!
//! The engine produces records; a [`Publisher`] delivers them. Records are
//! addressed by topic and may be marked retained, meaning the latest message on
//! the topic should be replayed to late subscribers.
//!
//! # Overview
//!
//! - **Publisher**: delivery trait implemented by every sink
//! - **JsonLinesPublisher**: writes one JSON object per message to any `Write`
//! - **MemoryPublisher**: keeps messages in memory for inspection
//! - **topics**: topic naming for each record kind
//!
//! # Usage Example
//!
//! ```rust
//! use rtls_simulator::transport::*;
//!
//! let mut publisher = MemoryPublisher::new();
//! publisher.publish(&topics::location("tag_001"), r#"{"tag_id":"tag_001"}"#, true).unwrap();
//! assert_eq!(publisher.messages()[0].topic, "rtls/location/tag_001");
//! ```

use std::fmt;

use thiserror::Error;

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonLinesPublisher;
pub use memory::{MemoryPublisher, PublishedMessage};

/// Topic names for published records
pub mod topics {
    /// Topic for zone transition alerts
    pub const ALERTS: &str = "rtls/alerts";

    /// Topic for system status (retained)
    pub const STATUS: &str = "rtls/status";

    /// Topic for a tag's location updates (retained)
    pub fn location(tag_id: &str) -> String {
        format!("rtls/location/{}", tag_id)
    }

    /// Topic for a zone's occupancy (retained)
    pub fn zone_tags(zone_id: &str) -> String {
        format!("rtls/zone/{}/tags", zone_id)
    }
}

/// Errors raised while delivering a message
#[derive(Debug, Error)]
pub enum TransportError {
    /// The sink is not accepting messages
    #[error("Publisher is disconnected")]
    Disconnected,

    /// Writing to the sink failed
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The message envelope could not be encoded
    #[error("Failed to encode message: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl TransportError {
    /// Whether the message can be dropped and the run continued
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TransportError::Disconnected)
    }
}

/// Delivers serialized records to a destination
///
/// `payload` is a JSON document.
pub trait Publisher: fmt::Debug {
    /// Deliver one message
    fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<(), TransportError>;

    /// Whether the destination is currently reachable
    fn is_connected(&self) -> bool {
        true
    }

    /// Push buffered messages to the destination
    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<P: Publisher + ?Sized> Publisher for Box<P> {
    fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<(), TransportError> {
        (**self).publish(topic, payload, retain)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        (**self).flush()
    }
}
