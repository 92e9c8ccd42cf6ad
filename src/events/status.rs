//! System status records
//!
//! Status is produced by the runner, not the engine, and published when a run
//! starts and when it stops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate health snapshot of a simulator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// When the status was produced
    pub timestamp: DateTime<Utc>,
    /// Number of tags being simulated
    pub active_tags: usize,
    /// Tick interval in seconds
    pub update_rate: f64,
    /// Whether the publish boundary reports a live connection
    pub broker_connected: bool,
    /// Free-text message
    pub message: String,
    /// Identifies the simulator run that produced the record
    pub session_id: Uuid,
}

impl SystemStatus {
    /// Create a status record stamped now
    pub fn new(
        session_id: Uuid,
        active_tags: usize,
        update_rate: f64,
        broker_connected: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            active_tags,
            update_rate,
            broker_connected,
            message: message.into(),
            session_id,
        }
    }

    /// Status announcing that a run has started
    pub fn started(session_id: Uuid, active_tags: usize, update_rate: f64, broker_connected: bool) -> Self {
        Self::new(session_id, active_tags, update_rate, broker_connected, "System started")
    }

    /// Status announcing that a run is shutting down
    pub fn shutting_down(session_id: Uuid) -> Self {
        Self::new(session_id, 0, 0.0, false, "System shutting down")
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_and_shutdown() {
        let session = Uuid::new_v4();

        let started = SystemStatus::started(session, 4, 1.0, true);
        assert_eq!(started.active_tags, 4);
        assert!(started.broker_connected);
        assert_eq!(started.message, "System started");

        let stopped = SystemStatus::shutting_down(session);
        assert_eq!(stopped.active_tags, 0);
        assert_eq!(stopped.update_rate, 0.0);
        assert!(!stopped.broker_connected);
        assert_eq!(stopped.session_id, session);
    }

    #[test]
    fn test_status_json() {
        let status = SystemStatus::started(Uuid::new_v4(), 2, 0.5, false);
        let json: serde_json::Value = serde_json::from_str(&status.to_json().unwrap()).unwrap();
        assert_eq!(json["active_tags"], 2);
        assert_eq!(json["update_rate"], 0.5);
        assert_eq!(json["broker_connected"], false);
    }
}
