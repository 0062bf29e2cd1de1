//! Simulator wiring: config in, trace and report out.

use crate::config::{ConfigError, SimulatorConfig};
use crate::metrics::{MetricsCollector, SimulationReport};
use crate::trace::TraceWriter;
use hdrhistogram::CreationError;
use queuesim_core::SimulationError;
use queuesim_simulation::{
    InvalidRate, SeededRandomSource, SimulationRunner, SimulationStats, StationRoster,
};
use std::io::{self, Write};
use thiserror::Error;
use tracing::info;

/// Errors from building or running a simulator.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rate(#[from] InvalidRate),

    #[error("failed to create waiting-time histogram: {0:?}")]
    Metrics(CreationError),

    #[error("simulation fault: {0}")]
    Simulation(#[from] SimulationError),

    #[error("failed to write trace: {0}")]
    Io(#[from] io::Error),
}

/// A configured simulation, ready to run.
pub struct Simulator {
    config: SimulatorConfig,
    runner: SimulationRunner,
    metrics: MetricsCollector,
}

impl Simulator {
    /// Validate `config` and build the roster, random source and arrival
    /// schedule it describes.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;

        let random = SeededRandomSource::new(config.seed, config.timing_rates())?;
        let roster = StationRoster::new(config.servers, config.self_checks, config.max_queue_length);
        let metrics = MetricsCollector::new(&roster).map_err(SimulatorError::Metrics)?;

        let mut runner = SimulationRunner::new(roster, random, config.rest_probability);
        runner.schedule_arrivals(config.customers, config.greedy_probability);

        info!(
            seed = config.seed,
            servers = config.servers,
            self_checks = config.self_checks,
            max_queue_length = config.max_queue_length,
            customers = config.customers,
            "Created simulator"
        );

        Ok(Self {
            config,
            runner,
            metrics,
        })
    }

    /// The configuration this simulator was built from.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Statistics so far.
    pub fn stats(&self) -> &SimulationStats {
        self.runner.stats()
    }

    /// Run to completion, writing the trace and summary to `trace`.
    pub fn run<W: Write>(
        &mut self,
        trace: &mut TraceWriter<W>,
    ) -> Result<SimulationReport, SimulatorError> {
        let metrics = &mut self.metrics;
        let mut write_result = Ok(());

        let stats = self.runner.run_with(|event| {
            metrics.record(event);
            if write_result.is_ok() {
                write_result = trace.write_event(event);
            }
        })?;
        write_result?;
        trace.write_summary(stats)?;

        let report = self.metrics.report();
        info!(
            served = report.served(),
            left = report.left(),
            rests = report.rests_taken(),
            "Run finished"
        );
        Ok(report)
    }

    /// Run to completion and return the full trace as a string.
    pub fn run_to_string(&mut self) -> Result<String, SimulatorError> {
        let mut trace = TraceWriter::new(Vec::new());
        self.run(&mut trace)?;
        Ok(String::from_utf8_lossy(&trace.into_inner()).into_owned())
    }
}
