//! Queue Simulator CLI
//!
//! Run a deterministic checkout simulation and print its event trace.
//!
//! # Example
//!
//! ```bash
//! # Classic input: seed servers self_checks max_queue customers
//! #                arrival service rest rest_probability greedy_probability
//! echo "1 2 1 2 10 1.0 1.0 0.1 0.2 0.3" | queuesim --stdin
//!
//! # Flags only, with a random seed
//! queuesim --servers 3 --self-checks 2 --customers 100 --report
//!
//! # A TOML file with a flag override
//! queuesim --config shop.toml --seed 7 --summary-only
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use queuesim_simulator::{Simulator, SimulatorConfig, TraceWriter};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Queue Simulator
///
/// Runs a discrete-event simulation of customers at staffed counters and
/// self-checkouts. Reproducible when the same seed is used.
#[derive(Parser, Debug)]
#[command(name = "queuesim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, conflicts_with = "stdin")]
    config: Option<PathBuf>,

    /// Read the ten whitespace-separated parameters from stdin
    #[arg(long)]
    stdin: bool,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of staffed counters
    #[arg(short = 's', long)]
    servers: Option<usize>,

    /// Number of self-checkout counters
    #[arg(short = 'k', long)]
    self_checks: Option<usize>,

    /// Maximum queue length per station
    #[arg(short = 'q', long)]
    max_queue: Option<usize>,

    /// Number of customers
    #[arg(short = 'n', long)]
    customers: Option<usize>,

    /// Customer arrival rate
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Service rate
    #[arg(long)]
    service_rate: Option<f64>,

    /// Rate at which resting servers return
    #[arg(long)]
    rest_rate: Option<f64>,

    /// Probability a server rests after a customer (0.0-1.0)
    #[arg(long)]
    rest_probability: Option<f64>,

    /// Probability a customer is greedy (0.0-1.0)
    #[arg(long)]
    greedy_probability: Option<f64>,

    /// Print only the final summary line
    #[arg(long)]
    summary_only: bool,

    /// Print the waiting-time report after the summary
    #[arg(long)]
    report: bool,
}

impl Args {
    /// Base configuration from stdin, a file, or defaults with a random seed.
    fn base_config(&self) -> Result<SimulatorConfig> {
        if self.stdin {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read parameters from stdin")?;
            return SimulatorConfig::parse_whitespace(&input)
                .context("Failed to parse parameters from stdin");
        }

        if let Some(ref path) = self.config {
            return SimulatorConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()));
        }

        Ok(SimulatorConfig::default().with_seed(rand::random()))
    }

    /// Apply CLI overrides to the configuration.
    fn apply_overrides(&self, config: &mut SimulatorConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(servers) = self.servers {
            config.servers = servers;
        }
        if let Some(self_checks) = self.self_checks {
            config.self_checks = self_checks;
        }
        if let Some(max_queue) = self.max_queue {
            config.max_queue_length = max_queue;
        }
        if let Some(customers) = self.customers {
            config.customers = customers;
        }
        if let Some(rate) = self.arrival_rate {
            config.arrival_rate = rate;
        }
        if let Some(rate) = self.service_rate {
            config.service_rate = rate;
        }
        if let Some(rate) = self.rest_rate {
            config.rest_rate = rate;
        }
        if let Some(probability) = self.rest_probability {
            config.rest_probability = probability;
        }
        if let Some(probability) = self.greedy_probability {
            config.greedy_probability = probability;
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the trace.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,queuesim_simulator=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = args.base_config()?;
    args.apply_overrides(&mut config);

    let mut simulator = Simulator::new(config).context("Failed to create simulator")?;

    let config = simulator.config();
    info!(
        seed = config.seed,
        arrival_rate = config.arrival_rate,
        service_rate = config.service_rate,
        rest_probability = config.rest_probability,
        greedy_probability = config.greedy_probability,
        "Starting simulation"
    );

    let stdout = io::stdout().lock();
    let mut trace = if args.summary_only {
        TraceWriter::summary_only(stdout)
    } else {
        TraceWriter::new(stdout)
    };

    let report = simulator.run(&mut trace).context("Simulation failed")?;

    if args.report {
        println!();
        report.print_summary();
    }

    Ok(())
}
