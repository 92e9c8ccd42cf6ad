//! Tick driver
//!
//! The SimulationRunner owns an engine and a publisher. It announces the run,
//! drives one engine tick per update interval, publishes every record the tick
//! produced and announces shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::events::SystemStatus;
use crate::perf_span;
use crate::simulation::{SimulationEngine, SimulationError, SimulationResult, SimulationStatistics, TickReport};
use crate::transport::{topics, Publisher};
use crate::types::{AnomalyInjection, SimulationConfig};

/// Longest single sleep while pacing, so a shutdown request is noticed promptly
const PACING_SLICE: Duration = Duration::from_millis(100);

/// Drives a [`SimulationEngine`] and publishes its output
#[derive(Debug)]
pub struct SimulationRunner<P: Publisher> {
    engine: SimulationEngine,
    publisher: P,
    statistics: SimulationStatistics,
    session_id: Uuid,
    /// Anomalies still waiting for the first tick to complete
    pending_anomalies: Vec<AnomalyInjection>,
    /// Sleep between ticks to hold the configured update interval
    pacing: bool,
    /// Set from outside (e.g. a signal handler) to end `run` after the current tick
    shutdown: Arc<AtomicBool>,
    started_at: Option<Instant>,
}

impl<P: Publisher> SimulationRunner<P> {
    /// Build an engine from `config` and wrap it
    pub fn new(config: SimulationConfig, publisher: P) -> SimulationResult<Self> {
        Ok(Self::from_engine(SimulationEngine::new(config)?, publisher))
    }

    /// Wrap an existing engine
    ///
    /// Anomalies listed in the engine's configuration are queued for after the
    /// first tick.
    pub fn from_engine(engine: SimulationEngine, publisher: P) -> Self {
        let statistics = SimulationStatistics::new(engine.tag_count(), engine.zones().len());
        let pending_anomalies = engine.config().anomalies.clone();

        Self {
            engine,
            publisher,
            statistics,
            session_id: Uuid::new_v4(),
            pending_anomalies,
            pacing: true,
            shutdown: Arc::new(AtomicBool::new(false)),
            started_at: None,
        }
    }

    /// Enable or disable sleeping between ticks
    pub fn with_pacing(mut self, pacing: bool) -> Self {
        self.pacing = pacing;
        self
    }

    /// Share an existing shutdown flag with this runner
    pub fn with_shutdown_flag(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Flag that stops [`run`](Self::run) after the current tick once set
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Whether a shutdown has been requested through the shutdown flag
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Identifier stamped into every status record of this run
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The driven engine
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// The driven engine, mutably
    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    /// The publisher
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Counters collected so far
    pub fn statistics(&self) -> &SimulationStatistics {
        &self.statistics
    }

    /// Whether `start` has been called without a matching `stop`
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Queue an anomaly for after the next tick
    pub fn queue_anomaly(&mut self, injection: AnomalyInjection) {
        self.pending_anomalies.push(injection);
    }

    /// Consume the runner, returning the engine and publisher
    pub fn into_parts(self) -> (SimulationEngine, P) {
        (self.engine, self.publisher)
    }

    /// Announce the run
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn start(&mut self) -> SimulationResult<()> {
        if self.is_running() {
            return Err(SimulationError::state_error("runner already started"));
        }

        self.started_at = Some(Instant::now());
        self.statistics.mark_started(Utc::now());

        let status = SystemStatus::started(
            self.session_id,
            self.engine.tag_count(),
            self.engine.config().update_interval,
            self.publisher.is_connected(),
        );
        self.publish(topics::STATUS, &status, true)?;
        self.publisher.flush()?;

        info!(
            "RTLS simulator started: {} tags, {} zones, {}s interval",
            self.engine.tag_count(),
            self.engine.zones().len(),
            self.engine.config().update_interval
        );
        Ok(())
    }

    /// Run one tick and publish its output
    ///
    /// Publishes a location update per tag (followed by that tag's alerts),
    /// then the occupancy of every zone.
    pub fn run_tick(&mut self) -> SimulationResult<TickReport> {
        if !self.is_running() {
            return Err(SimulationError::state_error("runner not started"));
        }

        let span = perf_span!("tick", generation = self.engine.generation() + 1);
        let _enter = span.enter();

        let dt = self.engine.config().update_interval;
        let report = self.engine.tick(dt);

        for outcome in &report.outcomes {
            self.publish(&topics::location(outcome.location.tag_id.as_str()), &outcome.location, true)?;
            self.statistics.record_location_update();

            for alert in &outcome.alerts {
                info!(
                    "Zone alert: {} {} {}",
                    alert.tag_name, alert.event_type, alert.zone_name
                );
                self.publish(topics::ALERTS, alert, false)?;
                self.statistics.record_alert(alert);
            }
        }

        for occupancy in self.engine.all_occupancy() {
            self.publish(&topics::zone_tags(occupancy.zone_id.as_str()), &occupancy, true)?;
            self.statistics.record_occupancy(&occupancy);
        }

        self.statistics.record_tick();
        self.apply_pending_anomalies();
        self.publisher.flush()?;

        debug!(generation = report.generation, alerts = report.alert_count(), "Tick published");
        Ok(report)
    }

    /// Announce shutdown and flush the publisher
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn stop(&mut self) -> SimulationResult<()> {
        let Some(started_at) = self.started_at.take() else {
            return Err(SimulationError::state_error("runner not started"));
        };

        self.publish(topics::STATUS, &SystemStatus::shutting_down(self.session_id), true)?;
        self.publisher.flush()?;
        self.statistics.finish(started_at.elapsed());

        info!("RTLS simulator stopped after {} ticks", self.statistics.ticks);
        Ok(())
    }

    /// Start, run `ticks` ticks (forever when `None`), then stop
    ///
    /// The loop also ends once the shutdown flag is set. Shutdown status is
    /// published even when a tick fails; the tick error is returned in that
    /// case.
    pub fn run(&mut self, ticks: Option<u64>) -> SimulationResult<()> {
        let interval = self.engine.config().tick_duration()?;
        self.start()?;

        let mut completed = 0u64;

        let result = loop {
            if self.shutdown_requested() {
                info!(completed, "Shutdown requested, stopping simulation");
                break Ok(());
            }
            if ticks.is_some_and(|limit| completed >= limit) {
                break Ok(());
            }

            let tick_started = Instant::now();
            if let Err(e) = self.run_tick() {
                break Err(e);
            }
            completed += 1;

            let more_to_come = ticks.map_or(true, |limit| completed < limit);
            if self.pacing && more_to_come {
                if let Some(deadline) = tick_started.checked_add(interval) {
                    self.pace_until(deadline);
                }
            }
        };

        let stopped = self.stop();
        result.and(stopped)
    }

    /// Sleep until `deadline`, waking early when a shutdown is requested
    fn pace_until(&self, deadline: Instant) {
        while !self.shutdown_requested() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                break;
            };
            if remaining.is_zero() {
                break;
            }
            thread::sleep(remaining.min(PACING_SLICE));
        }
    }

    fn apply_pending_anomalies(&mut self) {
        for injection in std::mem::take(&mut self.pending_anomalies) {
            if self.engine.inject_anomaly(&injection.tag_id, injection.kind) {
                self.statistics.record_anomaly();
            } else {
                warn!(tag_id = %injection.tag_id, kind = %injection.kind, "Skipping anomaly for unknown tag");
            }
        }
    }

    /// Serialize and publish a record
    ///
    /// A disconnected publisher drops the message; other failures abort.
    fn publish<T: Serialize>(&mut self, topic: &str, record: &T, retain: bool) -> SimulationResult<()> {
        let payload = serde_json::to_string(record)?;

        match self.publisher.publish(topic, &payload, retain) {
            Ok(()) => {
                self.statistics.record_publish(true);
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                debug!(topic, error = %e, "Message dropped");
                self.statistics.record_publish(false);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
