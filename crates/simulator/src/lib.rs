//! Queue Simulator
//!
//! A command-line front end built on top of the simulation framework.
//! Turns a configuration into a reproducible run and reports on it.
//!
//! # Architecture
//!
//! The simulator builds on `queuesim-simulation` to provide:
//!
//! - **Configuration**: builder, TOML file and classic whitespace input
//! - **Trace Output**: one line per event plus the `[avg served left]` summary
//! - **Metrics Collection**: waiting-time percentiles, per-station load, rests
//!
//! # Example
//!
//! ```no_run
//! use queuesim_simulator::{Simulator, SimulatorConfig, TraceWriter};
//!
//! // Two staffed counters and three self-checkouts
//! let config = SimulatorConfig::new(2, 3)
//!     .with_seed(42)
//!     .with_customers(100)
//!     .with_greedy_probability(0.25);
//!
//! let mut simulator = Simulator::new(config).unwrap();
//! let mut trace = TraceWriter::new(std::io::stdout());
//! let report = simulator.run(&mut trace).unwrap();
//!
//! println!("P99 wait: {:.3}", report.p99_wait());
//! ```

pub mod config;
pub mod metrics;
pub mod runner;
pub mod trace;

pub use config::{ConfigError, SimulatorConfig};
pub use metrics::{MetricsCollector, SimulationReport, StationLoad};
pub use runner::{Simulator, SimulatorError};
pub use trace::TraceWriter;
