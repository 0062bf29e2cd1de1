//! Configuration types for the simulator.

use queuesim_simulation::TimingRates;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A whitespace-format value could not be parsed.
    #[error("invalid value {value:?} for {field}")]
    Parse { field: &'static str, value: String },

    /// The whitespace input ended before every field was read.
    #[error("missing value for {0}")]
    Missing(&'static str),

    /// The TOML file could not be parsed.
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Values parsed but describe an impossible simulation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for a simulation run.
///
/// Every field has a default, so a TOML file only needs the values it
/// changes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Random seed for deterministic simulation.
    pub seed: u64,

    /// Number of staffed counters, each with its own queue.
    pub servers: usize,

    /// Number of self-checkout counters sharing one queue.
    pub self_checks: usize,

    /// Maximum queue length per station.
    pub max_queue_length: usize,

    /// Number of customers to simulate.
    pub customers: usize,

    /// Customer arrival rate.
    pub arrival_rate: f64,

    /// Service rate.
    pub service_rate: f64,

    /// Rate at which resting servers come back.
    pub rest_rate: f64,

    /// Chance a server rests after finishing a customer.
    pub rest_probability: f64,

    /// Chance a customer is greedy.
    pub greedy_probability: f64,
}

impl SimulatorConfig {
    /// Create a configuration with `servers` staffed counters and
    /// `self_checks` self-checkouts.
    pub fn new(servers: usize, self_checks: usize) -> Self {
        Self {
            seed: 12345,
            servers,
            self_checks,
            max_queue_length: 2,
            customers: 20,
            arrival_rate: 1.0,
            service_rate: 1.0,
            rest_rate: 0.1,
            rest_probability: 0.0,
            greedy_probability: 0.0,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Parse the ten whitespace-separated values
    /// `seed servers self_checks max_queue customers arrival service rest
    /// rest_probability greedy_probability`.
    pub fn parse_whitespace(input: &str) -> Result<Self, ConfigError> {
        let mut tokens = input.split_whitespace();
        Ok(Self {
            seed: next_value(&mut tokens, "seed")?,
            servers: next_value(&mut tokens, "servers")?,
            self_checks: next_value(&mut tokens, "self_checks")?,
            max_queue_length: next_value(&mut tokens, "max_queue_length")?,
            customers: next_value(&mut tokens, "customers")?,
            arrival_rate: next_value(&mut tokens, "arrival_rate")?,
            service_rate: next_value(&mut tokens, "service_rate")?,
            rest_rate: next_value(&mut tokens, "rest_rate")?,
            rest_probability: next_value(&mut tokens, "rest_probability")?,
            greedy_probability: next_value(&mut tokens, "greedy_probability")?,
        })
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum queue length.
    pub fn with_max_queue_length(mut self, length: usize) -> Self {
        self.max_queue_length = length;
        self
    }

    /// Set the number of customers.
    pub fn with_customers(mut self, customers: usize) -> Self {
        self.customers = customers;
        self
    }

    /// Set arrival and service rates.
    pub fn with_rates(mut self, arrival_rate: f64, service_rate: f64) -> Self {
        self.arrival_rate = arrival_rate;
        self.service_rate = service_rate;
        self
    }

    /// Set rest rate and rest probability.
    pub fn with_rest(mut self, rest_rate: f64, rest_probability: f64) -> Self {
        self.rest_rate = rest_rate;
        self.rest_probability = rest_probability;
        self
    }

    /// Set the greedy customer probability.
    pub fn with_greedy_probability(mut self, probability: f64) -> Self {
        self.greedy_probability = probability;
        self
    }

    /// Total number of stations.
    pub fn total_stations(&self) -> usize {
        self.servers + self.self_checks
    }

    /// Rates for the seeded random source.
    pub fn timing_rates(&self) -> TimingRates {
        TimingRates {
            arrival: self.arrival_rate,
            service: self.service_rate,
            rest: self.rest_rate,
        }
    }

    /// Check that the values describe a runnable simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.customers == 0 {
            return Err(invalid("at least one customer is required"));
        }
        if self.total_stations() == 0 {
            return Err(invalid("at least one server or self-check is required"));
        }
        if !(self.arrival_rate > 0.0) {
            return Err(invalid(format!(
                "arrival rate must be positive, got {}",
                self.arrival_rate
            )));
        }
        if !(self.service_rate > 0.0) {
            return Err(invalid(format!(
                "service rate must be positive, got {}",
                self.service_rate
            )));
        }
        if !(self.rest_rate >= 0.0) {
            return Err(invalid(format!(
                "rest rate must not be negative, got {}",
                self.rest_rate
            )));
        }
        for (name, value) in [
            ("rest probability", self.rest_probability),
            ("greedy probability", self.greedy_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn next_value<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
) -> Result<T, ConfigError> {
    let token = tokens.next().ok_or(ConfigError::Missing(field))?;
    token.parse().map_err(|_| ConfigError::Parse {
        field,
        value: token.to_string(),
    })
}
