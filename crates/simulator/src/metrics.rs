//! Metrics collection during simulation.
//!
//! Waiting times are recorded in microticks (millionths of a simulation
//! time unit) so the histogram keeps three significant figures for
//! sub-unit waits.

use hdrhistogram::{CreationError, Histogram};
use queuesim_core::{Event, EventStatus};
use queuesim_simulation::StationRoster;
use queuesim_types::{StationRef, ThreeDecimals};
use std::fmt;
use tracing::warn;

const MICROTICKS_PER_UNIT: f64 = 1_000_000.0;

fn to_microticks(time: f64) -> u64 {
    (time.max(0.0) * MICROTICKS_PER_UNIT).round() as u64
}

fn from_microticks(ticks: u64) -> f64 {
    ticks as f64 / MICROTICKS_PER_UNIT
}

/// Per-station service count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationLoad {
    pub station: StationRef,
    pub served: u64,
}

/// Observes events as the runner emits them.
#[derive(Debug)]
pub struct MetricsCollector {
    /// Waiting time of every served customer, in microticks.
    waiting_times: Histogram<u64>,
    total_waiting_time: f64,
    served: u64,
    left: u64,
    rests_taken: u64,
    events_processed: u64,
    stations: Vec<StationLoad>,
}

impl MetricsCollector {
    /// Create a collector with one service counter per roster station.
    pub fn new(roster: &StationRoster) -> Result<Self, CreationError> {
        Ok(Self {
            waiting_times: Histogram::new(3)?,
            total_waiting_time: 0.0,
            served: 0,
            left: 0,
            rests_taken: 0,
            events_processed: 0,
            stations: roster
                .iter()
                .map(|station| StationLoad {
                    station: station.station_ref(),
                    served: 0,
                })
                .collect(),
        })
    }

    /// Record one processed event.
    pub fn record(&mut self, event: &Event) {
        self.events_processed += 1;
        match event.status() {
            EventStatus::Served => {
                let wait = event.customer_waiting_time();
                // Auto-resizing histogram: `record` grows the range to fit.
                if let Err(err) = self.waiting_times.record(to_microticks(wait)) {
                    warn!(wait, ?err, "Waiting time outside histogram range");
                }
                self.total_waiting_time += wait;
                self.served += 1;
                if let Some(load) = event
                    .station()
                    .and_then(|station| self.stations.get_mut(station.index))
                {
                    load.served += 1;
                }
            }
            EventStatus::Leaves => self.left += 1,
            EventStatus::StationRests => self.rests_taken += 1,
            EventStatus::Arrives | EventStatus::Waits | EventStatus::Done => {}
        }
    }

    /// Snapshot the collected metrics.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            waiting_times: self.waiting_times.clone(),
            total_waiting_time: self.total_waiting_time,
            served: self.served,
            left: self.left,
            rests_taken: self.rests_taken,
            events_processed: self.events_processed,
            stations: self.stations.clone(),
        }
    }
}

/// Report produced at the end of a run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    waiting_times: Histogram<u64>,
    total_waiting_time: f64,
    served: u64,
    left: u64,
    rests_taken: u64,
    events_processed: u64,
    stations: Vec<StationLoad>,
}

impl SimulationReport {
    /// Customers served.
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Customers who left without service.
    pub fn left(&self) -> u64 {
        self.left
    }

    /// Rests taken across all stations.
    pub fn rests_taken(&self) -> u64 {
        self.rests_taken
    }

    /// Events processed, rest events included.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Service counts in roster order.
    pub fn station_loads(&self) -> &[StationLoad] {
        &self.stations
    }

    /// Mean waiting time over served customers.
    pub fn average_wait(&self) -> f64 {
        if self.served == 0 {
            0.0
        } else {
            self.total_waiting_time / self.served as f64
        }
    }

    /// Median waiting time.
    pub fn p50_wait(&self) -> f64 {
        from_microticks(self.waiting_times.value_at_quantile(0.50))
    }

    /// P90 waiting time.
    pub fn p90_wait(&self) -> f64 {
        from_microticks(self.waiting_times.value_at_quantile(0.90))
    }

    /// P99 waiting time.
    pub fn p99_wait(&self) -> f64 {
        from_microticks(self.waiting_times.value_at_quantile(0.99))
    }

    /// Longest waiting time.
    pub fn max_wait(&self) -> f64 {
        from_microticks(self.waiting_times.max())
    }

    /// Check if any waiting times were recorded.
    pub fn has_measurements(&self) -> bool {
        !self.waiting_times.is_empty()
    }

    /// Print a summary of the report.
    pub fn print_summary(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Report ---")?;
        writeln!(f, "Served:    {}", self.served)?;
        writeln!(f, "Left:      {}", self.left)?;
        writeln!(f, "Rests:     {}", self.rests_taken)?;
        writeln!(f, "Events:    {}", self.events_processed)?;

        if self.has_measurements() {
            writeln!(f)?;
            writeln!(f, "Waiting time:")?;
            writeln!(f, "  Avg:  {}", ThreeDecimals(self.average_wait()))?;
            writeln!(f, "  P50:  {}", ThreeDecimals(self.p50_wait()))?;
            writeln!(f, "  P90:  {}", ThreeDecimals(self.p90_wait()))?;
            writeln!(f, "  P99:  {}", ThreeDecimals(self.p99_wait()))?;
            writeln!(f, "  Max:  {}", ThreeDecimals(self.max_wait()))?;
        } else {
            writeln!(f)?;
            writeln!(f, "No waiting times recorded.")?;
        }

        writeln!(f)?;
        write!(f, "Per station:")?;
        for load in &self.stations {
            write!(f, "\n  {}: {}", load.station, load.served)?;
        }
        Ok(())
    }
}
