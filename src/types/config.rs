//! Configuration structures for the RTLS simulator
//!
//! This module contains the simulation configuration, its layered loading
//! (defaults, then a JSON config file, then command line overrides) and the
//! validation that runs before an engine is built.

use super::{AlertMode, AnomalyKind, TagType};
use crate::facility::Position;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Signal strength limits shared by the movement engine and validation
pub mod signal {
    /// Weakest reportable RSSI in dBm
    pub const RSSI_MIN: i32 = -90;

    /// Strongest reportable RSSI in dBm
    pub const RSSI_MAX: i32 = -40;

    /// RSSI assigned to every tag at startup
    pub const RSSI_INITIAL: i32 = -70;
}

/// Longest accepted update interval in seconds
pub const MAX_UPDATE_INTERVAL: f64 = 3600.0;

/// Largest accepted speed, acceleration, turn rate or jitter amplitude
pub const MAX_RATE: f64 = 1.0e6;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rtls-simulator",
    version = "0.1.0",
    about = "RTLS Simulator - Publishes mock real-time location data for tags moving through building zones",
    long_about = "Simulates tags (people, vehicles, assets) moving through a building made of rectangular zones and publishes location updates, zone transition alerts, zone occupancy and system status as JSON lines.

EXAMPLES:
    # Run with the built-in floor plan until interrupted
    rtls-simulator

    # Use a configuration file
    rtls-simulator --config building.json

    # Run 120 ticks at twice the default rate, reproducibly
    rtls-simulator --update-interval 0.5 --ticks 120 --seed 7

    # Force a fault onto a tag after the first tick
    rtls-simulator --inject-anomaly tag_002:low_battery

    # Generate configuration template
    rtls-simulator --print-config > building.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Seconds between ticks
    #[arg(
        long,
        help = "Seconds between ticks",
        long_help = "Fixed tick interval in seconds. Also used as the simulated elapsed time per tick. Must be greater than 0. Default: 1.0"
    )]
    pub update_interval: Option<f64>,

    /// Global maximum speed in m/s (vehicle ceiling)
    #[arg(long, help = "Maximum speed in m/s")]
    pub max_speed: Option<f64>,

    /// Acceleration limit in m/s^2
    #[arg(long, help = "Acceleration limit in m/s^2")]
    pub acceleration: Option<f64>,

    /// Turn rate limit in degrees per second
    #[arg(long, help = "Turn rate limit in degrees/s")]
    pub turn_rate: Option<f64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Number of ticks to run before stopping
    #[arg(
        long,
        help = "Number of ticks to run (runs until interrupted when omitted)"
    )]
    pub ticks: Option<u64>,

    /// Run ticks back to back instead of one per update interval
    #[arg(long, help = "Run ticks back to back without waiting for the update interval")]
    pub no_pacing: bool,

    /// Zone alert surfacing mode
    #[arg(
        long,
        help = "Zone alert mode (collapse or both)",
        long_help = "How a simultaneous exit and entry is reported. 'collapse' reports only the entry (one alert per tag per tick); 'both' reports the exit followed by the entry. Default: collapse"
    )]
    pub alert_mode: Option<String>,

    /// Output path for published messages
    #[arg(short, long, help = "Write published messages to a JSONL file instead of stdout")]
    pub output: Option<String>,

    /// Anomalies to inject after the first tick
    #[arg(
        long = "inject-anomaly",
        value_name = "TAG_ID:KIND",
        help = "Inject an anomaly after the first tick (repeatable)",
        long_help = "Inject an anomaly into a tag after the first tick. KIND is one of low_battery, weak_signal, fast_movement, out_of_bounds. May be given multiple times."
    )]
    pub inject_anomaly: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR", help = "Also write JSON logs to daily rolling files in DIR")]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Kinematic limits for the movement engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    /// Global maximum speed in m/s; the ceiling for vehicles
    pub max_speed: f64,
    /// Maximum speed change per second (m/s^2)
    pub acceleration: f64,
    /// Maximum heading change per second (degrees/s)
    pub turn_rate: f64,
    /// Speed ceiling for person tags
    pub person_max_speed: f64,
    /// Speed ceiling for asset tags
    pub asset_max_speed: f64,
    /// Per-tick probability that an asset moves
    pub asset_move_probability: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            acceleration: 0.5,
            turn_rate: 45.0,
            person_max_speed: 2.0,
            asset_max_speed: 1.0,
            asset_move_probability: 0.01,
        }
    }
}

/// Stochastic telemetry noise applied every tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Per-tick probability that battery drops by one percent
    pub battery_drain_probability: f64,
    /// Maximum RSSI perturbation per tick in dBm (applied as +/-)
    pub rssi_jitter: i32,
    /// Per-tick probability of a height change for person tags
    pub vertical_jitter_probability: f64,
    /// Maximum height change in meters (applied as +/-)
    pub vertical_jitter: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            battery_drain_probability: 0.001,
            rssi_jitter: 5,
            vertical_jitter_probability: 0.1,
            vertical_jitter: 0.1,
        }
    }
}

/// Axis-aligned bounds of a zone
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BoundsConfig {
    /// Lower x bound
    pub x_min: f64,
    /// Upper x bound
    pub x_max: f64,
    /// Lower y bound
    pub y_min: f64,
    /// Upper y bound
    pub y_max: f64,
    /// Lower z bound
    pub z_min: f64,
    /// Upper z bound
    pub z_max: f64,
}

/// Zone definition as it appears in configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneConfig {
    /// Unique zone id
    pub id: String,
    /// Display name
    pub name: String,
    /// Zone volume
    pub bounds: BoundsConfig,
}

fn default_battery() -> u8 {
    100
}

/// Tag definition as it appears in configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagConfig {
    /// Unique tag id
    pub id: String,
    /// Display name
    pub name: String,
    /// Tag type; unknown strings fall back to `person`
    #[serde(rename = "type", default)]
    pub tag_type: TagType,
    /// Starting position (z defaults to 0)
    pub initial_position: Position,
    /// Starting battery percentage
    #[serde(default = "default_battery")]
    pub battery: u8,
}

/// A fault to force onto a tag once the simulation is running
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnomalyInjection {
    /// Target tag id
    pub tag_id: String,
    /// Fault to apply
    pub kind: AnomalyKind,
}

impl AnomalyInjection {
    /// Parse a `TAG_ID:KIND` command line value
    pub fn parse_arg(value: &str) -> Result<Self, ConfigError> {
        let (tag_id, kind) = value
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::InvalidArgument(format!("expected TAG_ID:KIND, got '{}'", value)))?;
        if tag_id.is_empty() {
            return Err(ConfigError::InvalidArgument(format!("missing tag id in '{}'", value)));
        }
        let kind = kind.parse::<AnomalyKind>().map_err(ConfigError::InvalidArgument)?;
        Ok(Self { tag_id: tag_id.to_string(), kind })
    }
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Seconds between ticks
    pub update_interval: Option<f64>,

    /// Kinematic limits
    pub movement: Option<MovementConfig>,

    /// Telemetry noise parameters
    pub noise: Option<NoiseConfig>,

    /// Zone list, in match priority order
    pub zones: Option<Vec<ZoneConfig>>,

    /// Tag list
    pub tags: Option<Vec<TagConfig>>,

    /// Zone alert surfacing mode
    pub alert_mode: Option<AlertMode>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of ticks to run
    pub ticks: Option<u64>,

    /// Output path for published messages
    pub output: Option<String>,

    /// Anomalies to inject after the first tick
    pub anomalies: Option<Vec<AnomalyInjection>>,
}

/// Configuration for the RTLS simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds between ticks, also the simulated `dt` per tick
    pub update_interval: f64,

    /// Kinematic limits
    pub movement: MovementConfig,

    /// Telemetry noise parameters
    pub noise: NoiseConfig,

    /// Zone list, in match priority order
    pub zones: Vec<ZoneConfig>,

    /// Tag list
    pub tags: Vec<TagConfig>,

    /// Zone alert surfacing mode
    pub alert_mode: AlertMode,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of ticks to run (`None` runs until interrupted)
    pub ticks: Option<u64>,

    /// Output path for published messages (`None` writes to stdout)
    pub output: Option<String>,

    /// Anomalies to inject after the first tick
    pub anomalies: Vec<AnomalyInjection>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A command line value could not be interpreted
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Tick interval is not a positive number of seconds up to an hour
    #[error("Update interval must be greater than 0 and at most 3600 seconds, got {0}")]
    InvalidUpdateInterval(f64),

    /// A speed-like parameter is negative, not finite or too large
    #[error("Invalid value for {field}: {value} (must be between 0 and 1000000)")]
    InvalidRate {
        /// Name of the offending field
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Probability value is out of range
    #[error("Invalid probability for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability {
        /// Name of the field with invalid probability
        field: String,
        /// The invalid probability value
        value: f64,
    },

    /// RSSI jitter is negative
    #[error("RSSI jitter must be >= 0, got {0}")]
    InvalidRssiJitter(i32),

    /// Zone bounds are inverted or not finite on some axis
    #[error("Zone {zone_id} has invalid {axis} bounds: min ({min}) must be <= max ({max})")]
    InvalidZoneBounds {
        /// Offending zone
        zone_id: String,
        /// Axis name (x, y or z)
        axis: &'static str,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Two zones share an id
    #[error("Duplicate zone id: {0}")]
    DuplicateZoneId(String),

    /// Two tags share an id
    #[error("Duplicate tag id: {0}")]
    DuplicateTagId(String),

    /// A zone or tag has an empty id
    #[error("Empty {0} id")]
    EmptyId(&'static str),

    /// Battery percentage above 100
    #[error("Tag {tag_id} has invalid battery {value} (must be 0-100)")]
    InvalidBattery {
        /// Offending tag
        tag_id: String,
        /// The invalid battery value
        value: u8,
    },

    /// Tag initial position is not finite
    #[error("Tag {0} has a non-finite initial position")]
    InvalidPosition(String),

    /// No tags configured
    #[error("At least one tag must be configured")]
    NoTags,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            update_interval: 1.0,
            movement: MovementConfig::default(),
            noise: NoiseConfig::default(),
            zones: default_zones(),
            tags: default_tags(),
            alert_mode: AlertMode::default(),
            seed: None,
            ticks: None,
            output: None,
            anomalies: Vec::new(),
        }
    }
}

fn default_zones() -> Vec<ZoneConfig> {
    let zone = |id: &str, name: &str, bounds: [f64; 6]| ZoneConfig {
        id: id.to_string(),
        name: name.to_string(),
        bounds: BoundsConfig {
            x_min: bounds[0],
            x_max: bounds[1],
            y_min: bounds[2],
            y_max: bounds[3],
            z_min: bounds[4],
            z_max: bounds[5],
        },
    };

    vec![
        zone("zone_lobby", "Main Lobby", [0.0, 20.0, 0.0, 15.0, 0.0, 4.0]),
        zone("zone_warehouse", "Warehouse", [20.0, 80.0, 0.0, 40.0, 0.0, 10.0]),
        zone("zone_office", "Office Wing", [0.0, 20.0, 15.0, 40.0, 0.0, 4.0]),
    ]
}

fn default_tags() -> Vec<TagConfig> {
    let tag = |id: &str, name: &str, tag_type: TagType, position: Position, battery: u8| TagConfig {
        id: id.to_string(),
        name: name.to_string(),
        tag_type,
        initial_position: position,
        battery,
    };

    vec![
        tag("tag_001", "John Doe", TagType::Person, Position::new(10.0, 7.0, 1.2), 100),
        tag("tag_002", "Forklift 1", TagType::Vehicle, Position::new(40.0, 20.0, 0.0), 100),
        tag("tag_003", "Pallet Scanner", TagType::Asset, Position::new(60.0, 30.0, 0.5), 85),
        tag("tag_004", "Jane Smith", TagType::Person, Position::new(5.0, 25.0, 1.0), 100),
    ]
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args)?;

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            update_interval: config_file.update_interval.unwrap_or(defaults.update_interval),
            movement: config_file.movement.unwrap_or(defaults.movement),
            noise: config_file.noise.unwrap_or(defaults.noise),
            zones: config_file.zones.unwrap_or(defaults.zones),
            tags: config_file.tags.unwrap_or(defaults.tags),
            alert_mode: config_file.alert_mode.unwrap_or(defaults.alert_mode),
            seed: config_file.seed.or(defaults.seed),
            ticks: config_file.ticks.or(defaults.ticks),
            output: config_file.output.or(defaults.output),
            anomalies: config_file.anomalies.unwrap_or(defaults.anomalies),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.update_interval {
            config.update_interval = value;
        }
        if let Some(value) = args.max_speed {
            config.movement.max_speed = value;
        }
        if let Some(value) = args.acceleration {
            config.movement.acceleration = value;
        }
        if let Some(value) = args.turn_rate {
            config.movement.turn_rate = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.ticks {
            config.ticks = Some(value);
        }
        if let Some(value) = args.alert_mode {
            config.alert_mode = value.parse().map_err(ConfigError::InvalidArgument)?;
        }
        if let Some(value) = args.output {
            config.output = Some(value);
        }

        // Command line injections are added to any from the file
        for value in &args.inject_anomaly {
            config.anomalies.push(AnomalyInjection::parse_arg(value)?);
        }

        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Tick interval as a `Duration`
    pub fn tick_duration(&self) -> Result<Duration, ConfigValidationError> {
        Duration::try_from_secs_f64(self.update_interval)
            .map_err(|_| ConfigValidationError::InvalidUpdateInterval(self.update_interval))
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.update_interval > 0.0 && self.update_interval <= MAX_UPDATE_INTERVAL) {
            return Err(ConfigValidationError::InvalidUpdateInterval(self.update_interval));
        }

        let movement = &self.movement;
        self.validate_rate("max_speed", movement.max_speed)?;
        self.validate_rate("acceleration", movement.acceleration)?;
        self.validate_rate("turn_rate", movement.turn_rate)?;
        self.validate_rate("person_max_speed", movement.person_max_speed)?;
        self.validate_rate("asset_max_speed", movement.asset_max_speed)?;
        self.validate_probability("asset_move_probability", movement.asset_move_probability)?;

        let noise = &self.noise;
        self.validate_probability("battery_drain_probability", noise.battery_drain_probability)?;
        self.validate_probability("vertical_jitter_probability", noise.vertical_jitter_probability)?;
        self.validate_rate("vertical_jitter", noise.vertical_jitter)?;
        if noise.rssi_jitter < 0 {
            return Err(ConfigValidationError::InvalidRssiJitter(noise.rssi_jitter));
        }

        let mut zone_ids = HashSet::new();
        for zone in &self.zones {
            if zone.id.is_empty() {
                return Err(ConfigValidationError::EmptyId("zone"));
            }
            if !zone_ids.insert(zone.id.as_str()) {
                return Err(ConfigValidationError::DuplicateZoneId(zone.id.clone()));
            }
            let b = &zone.bounds;
            for (axis, min, max) in [("x", b.x_min, b.x_max), ("y", b.y_min, b.y_max), ("z", b.z_min, b.z_max)] {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(ConfigValidationError::InvalidZoneBounds {
                        zone_id: zone.id.clone(),
                        axis,
                        min,
                        max,
                    });
                }
            }
        }

        if self.tags.is_empty() {
            return Err(ConfigValidationError::NoTags);
        }

        let mut tag_ids = HashSet::new();
        for tag in &self.tags {
            if tag.id.is_empty() {
                return Err(ConfigValidationError::EmptyId("tag"));
            }
            if !tag_ids.insert(tag.id.as_str()) {
                return Err(ConfigValidationError::DuplicateTagId(tag.id.clone()));
            }
            if tag.battery > 100 {
                return Err(ConfigValidationError::InvalidBattery {
                    tag_id: tag.id.clone(),
                    value: tag.battery,
                });
            }
            let p = tag.initial_position;
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                return Err(ConfigValidationError::InvalidPosition(tag.id.clone()));
            }
        }

        Ok(())
    }

    fn validate_rate(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(0.0..=MAX_RATE).contains(&value) {
            return Err(ConfigValidationError::InvalidRate { field: field.to_string(), value });
        }
        Ok(())
    }

    fn validate_probability(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigValidationError::InvalidProbability {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }
}
