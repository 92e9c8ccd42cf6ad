//! Statistics collection and reporting
//!
//! Counters kept by the runner over one simulation run.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{ZoneAlert, ZoneOccupancy};
use crate::types::{ZoneEventType, ZoneId};

/// Counters for a simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Number of tags being simulated
    pub total_tags: usize,
    /// Number of configured zones
    pub total_zones: usize,
    /// Completed ticks
    pub ticks: u64,
    /// Location snapshots handed to the publisher
    pub location_updates: u64,
    /// Zone entry alerts
    pub entered_alerts: u64,
    /// Zone exit alerts
    pub exited_alerts: u64,
    /// Anomalies applied to tags
    pub anomalies_injected: u64,
    /// Messages accepted by the publisher
    pub published_messages: u64,
    /// Messages the publisher could not deliver
    pub dropped_messages: u64,
    /// Highest tag count seen in each zone
    pub peak_occupancy: BTreeMap<ZoneId, usize>,
    /// When the run started
    pub started_at: Option<DateTime<Utc>>,
    /// Wall-clock duration of the run
    pub simulation_duration: Duration,
}

impl SimulationStatistics {
    /// Create statistics for a run over the given population
    pub fn new(total_tags: usize, total_zones: usize) -> Self {
        Self { total_tags, total_zones, ..Default::default() }
    }

    /// Mark the start of the run
    pub fn mark_started(&mut self, at: DateTime<Utc>) {
        self.started_at = Some(at);
    }

    /// Record the run's total duration
    pub fn finish(&mut self, duration: Duration) {
        self.simulation_duration = duration;
    }

    /// Count a completed tick
    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Count a published location snapshot
    pub fn record_location_update(&mut self) {
        self.location_updates += 1;
    }

    /// Count a zone alert
    pub fn record_alert(&mut self, alert: &ZoneAlert) {
        match alert.event_type {
            ZoneEventType::Entered => self.entered_alerts += 1,
            ZoneEventType::Exited => self.exited_alerts += 1,
        }
    }

    /// Count an injected anomaly
    pub fn record_anomaly(&mut self) {
        self.anomalies_injected += 1;
    }

    /// Count the outcome of a publish attempt
    pub fn record_publish(&mut self, delivered: bool) {
        if delivered {
            self.published_messages += 1;
        } else {
            self.dropped_messages += 1;
        }
    }

    /// Track the peak tag count of a zone
    pub fn record_occupancy(&mut self, occupancy: &ZoneOccupancy) {
        let peak = self.peak_occupancy.entry(occupancy.zone_id.clone()).or_insert(0);
        *peak = (*peak).max(occupancy.tag_count);
    }

    /// Total zone alerts of either kind
    pub fn total_alerts(&self) -> u64 {
        self.entered_alerts + self.exited_alerts
    }

    /// Average alerts per completed tick
    pub fn alerts_per_tick(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.total_alerts() as f64 / self.ticks as f64
        }
    }

    /// One-line summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Run Summary: {} ticks | {} tags in {} zones | {} location updates | Alerts: {} entered, {} exited ({:.2}/tick) | {} anomalies | {} published, {} dropped | {:.1}s",
            self.ticks,
            self.total_tags,
            self.total_zones,
            self.location_updates,
            self.entered_alerts,
            self.exited_alerts,
            self.alerts_per_tick(),
            self.anomalies_injected,
            self.published_messages,
            self.dropped_messages,
            self.simulation_duration.as_secs_f64(),
        )
    }

    /// Multi-line report including per-zone peak occupancy
    pub fn detailed_report(&self) -> String {
        let mut report = String::from("=== Simulation Statistics ===\n");
        if let Some(started_at) = self.started_at {
            report.push_str(&format!("Started: {}\n", started_at.to_rfc3339()));
        }
        report.push_str(&format!("Duration: {:.1}s\n", self.simulation_duration.as_secs_f64()));
        report.push_str(&format!("Ticks: {}\n", self.ticks));
        report.push_str(&format!("Location updates: {}\n", self.location_updates));
        report.push_str(&format!("Zone alerts: {} entered, {} exited\n", self.entered_alerts, self.exited_alerts));
        report.push_str(&format!("Anomalies injected: {}\n", self.anomalies_injected));
        report.push_str(&format!(
            "Messages: {} published, {} dropped\n",
            self.published_messages, self.dropped_messages
        ));

        if !self.peak_occupancy.is_empty() {
            report.push_str("\nPeak occupancy:\n");
            for (zone_id, peak) in &self.peak_occupancy {
                report.push_str(&format!("  {}: {}\n", zone_id, peak));
            }
        }

        report
    }
}

impl fmt::Display for SimulationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{Position, Zone};
    use crate::tag::Tag;
    use crate::types::{BoundsConfig, TagType};

    fn alert(event_type: ZoneEventType) -> ZoneAlert {
        let tag = Tag::new("t", "T", TagType::Person, Position::default());
        let zone = Zone::new("z", "Z", BoundsConfig::default());
        ZoneAlert::new(&tag, &zone, event_type, Utc::now())
    }

    #[test]
    fn test_alert_counts() {
        let mut stats = SimulationStatistics::new(4, 3);
        stats.record_alert(&alert(ZoneEventType::Entered));
        stats.record_alert(&alert(ZoneEventType::Entered));
        stats.record_alert(&alert(ZoneEventType::Exited));

        assert_eq!(stats.entered_alerts, 2);
        assert_eq!(stats.exited_alerts, 1);
        assert_eq!(stats.total_alerts(), 3);
        assert_eq!(stats.alerts_per_tick(), 0.0);

        stats.record_tick();
        stats.record_tick();
        assert_eq!(stats.alerts_per_tick(), 1.5);
    }

    #[test]
    fn test_peak_occupancy_keeps_maximum() {
        let mut stats = SimulationStatistics::new(2, 1);
        let a = Tag::new("a", "A", TagType::Person, Position::default());
        let b = Tag::new("b", "B", TagType::Asset, Position::default());

        stats.record_occupancy(&ZoneOccupancy::new(ZoneId::new("z"), [&a, &b], 1));
        stats.record_occupancy(&ZoneOccupancy::new(ZoneId::new("z"), [&a], 2));

        assert_eq!(stats.peak_occupancy[&ZoneId::new("z")], 2);
        assert!(stats.detailed_report().contains("  z: 2"));
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut stats = SimulationStatistics::new(4, 3);
        stats.record_publish(true);
        stats.record_publish(false);
        stats.record_location_update();
        stats.finish(Duration::from_secs(2));

        let summary = stats.to_string();
        assert!(summary.contains("4 tags in 3 zones"));
        assert!(summary.contains("1 published, 1 dropped"));
        assert!(summary.contains("2.0s"));
    }
}
