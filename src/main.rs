// RTLS Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/rtls-simulator --ticks 60
// ```
//
// Or with a custom building and a file sink:
//
// ```console
// $ ./target/release/rtls-simulator --config building.json --output messages.jsonl --verbose
// ```

use std::fs::File;
use std::io::BufWriter;
use std::process;
use std::sync::atomic::Ordering;

use anyhow::Context;
use clap::Parser;
use rtls_simulator::simulation::{LoggingConfig, SimulationRunner};
use rtls_simulator::transport::{JsonLinesPublisher, Publisher};
use rtls_simulator::types::config::CliArgs;
use rtls_simulator::types::SimulationConfig;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let mut logging = LoggingConfig::from_flags(args.verbose, args.debug, args.json_logs);
    if let Some(directory) = &args.log_dir {
        logging = logging.with_file_logging(directory.clone());
    }

    let _logging = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting RTLS Simulator");

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("RTLS Simulator finished");
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let dry_run = args.dry_run;
    let pacing = !args.no_pacing;

    // Load configuration from CLI arguments and optional config file
    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    match config.output.clone() {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("Failed to create output file '{}'", path))?;
            run_simulation(config, JsonLinesPublisher::new(BufWriter::new(file)), pacing)?;
            eprintln!("Messages written to: {}", path);
        }
        None => run_simulation(config, JsonLinesPublisher::stdout(), pacing)?,
    }

    Ok(())
}

fn run_simulation<P: Publisher>(config: SimulationConfig, publisher: P, pacing: bool) -> anyhow::Result<()> {
    let ticks = config.ticks;
    let mut runner = SimulationRunner::new(config, publisher)
        .context("Failed to initialize simulation")?
        .with_pacing(pacing);

    let shutdown = runner.shutdown_handle();
    ctrlc::set_handler(move || {
        info!("Received termination signal, shutting down");
        shutdown.store(true, Ordering::SeqCst);
    })
    .context("Failed to install signal handler")?;

    runner.run(ticks).context("Simulation failed")?;

    eprintln!();
    eprintln!("{}", runner.statistics().detailed_report());
    eprintln!("{}", runner.statistics().summary());
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("RTLS Simulator");
    eprintln!("==============");
    eprintln!("Mock real-time location data for tags moving through building zones");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Update Interval: {}s", config.update_interval);
    eprintln!(
        "  Movement: max {} m/s, acceleration {} m/s^2, turn rate {} deg/s",
        config.movement.max_speed, config.movement.acceleration, config.movement.turn_rate
    );
    eprintln!("  Alert Mode: {}", config.alert_mode);
    match config.ticks {
        Some(ticks) => eprintln!("  Ticks: {}", ticks),
        None => eprintln!("  Ticks: until interrupted"),
    }
    eprintln!("  Output: {}", config.output.as_deref().unwrap_or("stdout"));
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }

    eprintln!("\nZones:");
    for zone in &config.zones {
        let b = &zone.bounds;
        eprintln!(
            "  {} ({}): x {}..{}, y {}..{}, z {}..{}",
            zone.id, zone.name, b.x_min, b.x_max, b.y_min, b.y_max, b.z_min, b.z_max
        );
    }

    eprintln!("\nTags:");
    for tag in &config.tags {
        let p = &tag.initial_position;
        eprintln!("  {} ({}, {}) at ({}, {}, {}) battery {}%", tag.id, tag.name, tag.tag_type, p.x, p.y, p.z, tag.battery);
    }

    if !config.anomalies.is_empty() {
        eprintln!("\nAnomalies after first tick:");
        for anomaly in &config.anomalies {
            eprintln!("  {} -> {}", anomaly.tag_id, anomaly.kind);
        }
    }
    eprintln!();
}
