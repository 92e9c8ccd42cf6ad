//! Tests for zone entry and exit detection
//!
//! Tags here never move on their own; each test teleports a tag and runs one
//! update so the expected transition is exact.

use chrono::Utc;
use rtls_simulator::simulation::SimulationEngine;
use rtls_simulator::types::{
    AlertMode, BoundsConfig, MovementConfig, NoiseConfig, SimulationConfig, TagConfig, ZoneConfig, ZoneEventType,
};
use rtls_simulator::{Position, TagType};

fn zone(id: &str, x_min: f64, x_max: f64) -> ZoneConfig {
    ZoneConfig {
        id: id.to_string(),
        name: id.to_uppercase(),
        bounds: BoundsConfig { x_min, x_max, y_min: 0.0, y_max: 10.0, z_min: 0.0, z_max: 5.0 },
    }
}

/// West [0,10] and east [10,20] share the wall at x = 10
fn config(alert_mode: AlertMode) -> SimulationConfig {
    SimulationConfig {
        seed: Some(11),
        alert_mode,
        movement: MovementConfig { max_speed: 0.0, acceleration: 0.0, turn_rate: 0.0, ..Default::default() },
        noise: NoiseConfig {
            battery_drain_probability: 0.0,
            rssi_jitter: 0,
            vertical_jitter_probability: 0.0,
            vertical_jitter: 0.0,
        },
        zones: vec![zone("west", 0.0, 10.0), zone("east", 10.0, 20.0)],
        tags: vec![TagConfig {
            id: "cart".to_string(),
            name: "Cart".to_string(),
            tag_type: TagType::Vehicle,
            initial_position: Position::new(5.0, 5.0, 0.0),
            battery: 100,
        }],
        ..Default::default()
    }
}

fn teleport(engine: &mut SimulationEngine, x: f64) {
    engine.tag_mut("cart").unwrap().position = Position::new(x, 5.0, 0.0);
}

#[test]
fn test_initial_zone_from_configured_position() {
    let engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    assert!(engine.tag("cart").unwrap().is_in("west"));
    assert_eq!(engine.tags_in_zone("west").len(), 1);
    assert!(engine.tags_in_zone("east").is_empty());
}

#[test]
fn test_no_alert_while_staying_in_zone() {
    let mut engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    teleport(&mut engine, 7.0);

    assert!(engine.advance("cart", 1.0).is_none());
    assert!(engine.tag("cart").unwrap().is_in("west"));
}

#[test]
fn test_zone_to_zone_collapses_to_entry() {
    let mut engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    teleport(&mut engine, 15.0);

    let alert = engine.advance("cart", 1.0).unwrap();

    assert_eq!(alert.event_type, ZoneEventType::Entered);
    assert_eq!(alert.zone_id.as_str(), "east");
    assert_eq!(alert.zone_name, "EAST");
    assert_eq!(alert.tag_name, "Cart");
    assert!(engine.tag("cart").unwrap().is_in("east"));
}

#[test]
fn test_advance_at_exposes_both_sides() {
    let mut engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    teleport(&mut engine, 15.0);
    let now = Utc::now();

    let transition = engine.advance_at("cart", 1.0, now).unwrap();

    let exited = transition.exited.as_ref().unwrap();
    let entered = transition.entered.as_ref().unwrap();
    assert_eq!(exited.zone_id.as_str(), "west");
    assert_eq!(entered.zone_id.as_str(), "east");
    assert_eq!(exited.timestamp, now);
}

#[test]
fn test_tick_in_both_mode_reports_exit_then_entry() {
    let mut engine = SimulationEngine::new(config(AlertMode::Both)).unwrap();
    teleport(&mut engine, 15.0);

    let report = engine.tick(1.0);
    let alerts: Vec<_> = report.alerts().collect();

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].event_type, ZoneEventType::Exited);
    assert_eq!(alerts[0].zone_id.as_str(), "west");
    assert_eq!(alerts[1].event_type, ZoneEventType::Entered);
    assert_eq!(alerts[1].zone_id.as_str(), "east");
}

#[test]
fn test_tick_in_collapse_mode_reports_one_alert() {
    let mut engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    teleport(&mut engine, 15.0);

    let report = engine.tick(1.0);

    assert_eq!(report.alert_count(), 1);
    assert!(report.alerts().next().unwrap().is_entry());
}

#[test]
fn test_leaving_every_zone_reports_exit() {
    let mut engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    teleport(&mut engine, 50.0);

    let alert = engine.advance("cart", 1.0).unwrap();

    assert_eq!(alert.event_type, ZoneEventType::Exited);
    assert_eq!(alert.zone_id.as_str(), "west");
    assert!(engine.tag("cart").unwrap().zone_id.is_none());

    // Outside to outside is not a transition
    teleport(&mut engine, 60.0);
    assert!(engine.advance("cart", 1.0).is_none());
}

#[test]
fn test_reentering_reports_entry_only() {
    let mut engine = SimulationEngine::new(config(AlertMode::Both)).unwrap();
    teleport(&mut engine, 50.0);
    engine.tick(1.0);

    teleport(&mut engine, 12.0);
    let report = engine.tick(1.0);
    let alerts: Vec<_> = report.alerts().collect();

    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].is_entry());
    assert_eq!(alerts[0].zone_id.as_str(), "east");
}

#[test]
fn test_shared_wall_belongs_to_first_zone() {
    let mut engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    teleport(&mut engine, 10.0);

    assert!(engine.advance("cart", 1.0).is_none());
    assert!(engine.tag("cart").unwrap().is_in("west"));
}

#[test]
fn test_containment_is_boundary_inclusive() {
    let engine = SimulationEngine::new(config(AlertMode::Collapse)).unwrap();
    let west = engine.zones().get("west").unwrap();

    assert!(west.contains(&Position::new(0.0, 0.0, 0.0)));
    assert!(west.contains(&Position::new(10.0, 10.0, 5.0)));
    assert!(west.contains(&Position::new(5.0, 5.0, 2.5)));
    assert!(!west.contains(&Position::new(10.1, 5.0, 2.5)));
    assert!(!west.contains(&Position::new(5.0, -0.1, 2.5)));
    assert!(!west.contains(&Position::new(5.0, 5.0, 5.1)));
}
