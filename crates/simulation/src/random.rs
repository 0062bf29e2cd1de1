//! Seeded random source.

use queuesim_core::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};
use thiserror::Error;

/// Rates of the three exponential timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRates {
    /// Customer arrivals per unit time.
    pub arrival: f64,
    /// Services completed per unit time.
    pub service: f64,
    /// Rests ended per unit time.
    pub rest: f64,
}

/// A rate that cannot parameterize an exponential distribution.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid {name} rate {value}")]
pub struct InvalidRate {
    pub name: &'static str,
    pub value: f64,
}

/// Stream numbers, one per operation.
const INTERARRIVAL_STREAM: u64 = 0;
const CUSTOMER_TYPE_STREAM: u64 = 1;
const SERVICE_STREAM: u64 = 2;
const REST_DRAW_STREAM: u64 = 3;
const REST_PERIOD_STREAM: u64 = 4;

/// [`RandomSource`] backed by ChaCha8 streams derived from one seed.
///
/// Every operation draws from its own stream, so consuming one quantity
/// never shifts another: an extra rest draw leaves all later service
/// times exactly as they were.
#[derive(Debug, Clone)]
pub struct SeededRandomSource {
    interarrival_rng: ChaCha8Rng,
    customer_type_rng: ChaCha8Rng,
    service_rng: ChaCha8Rng,
    rest_draw_rng: ChaCha8Rng,
    rest_period_rng: ChaCha8Rng,
    arrival: Exp<f64>,
    service: Exp<f64>,
    rest: Exp<f64>,
}

impl SeededRandomSource {
    /// Create a source for `seed` with exponential timings at `rates`.
    ///
    /// Arrival and service rates must be positive; the rest rate may be
    /// zero, in which case rests never end.
    pub fn new(seed: u64, rates: TimingRates) -> Result<Self, InvalidRate> {
        Ok(Self {
            interarrival_rng: stream(seed, INTERARRIVAL_STREAM),
            customer_type_rng: stream(seed, CUSTOMER_TYPE_STREAM),
            service_rng: stream(seed, SERVICE_STREAM),
            rest_draw_rng: stream(seed, REST_DRAW_STREAM),
            rest_period_rng: stream(seed, REST_PERIOD_STREAM),
            arrival: positive_exp("arrival", rates.arrival)?,
            service: positive_exp("service", rates.service)?,
            rest: Exp::new(rates.rest).map_err(|_| InvalidRate {
                name: "rest",
                value: rates.rest,
            })?,
        })
    }
}

fn stream(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

fn positive_exp(name: &'static str, value: f64) -> Result<Exp<f64>, InvalidRate> {
    if !(value > 0.0) {
        return Err(InvalidRate { name, value });
    }
    Exp::new(value).map_err(|_| InvalidRate { name, value })
}

impl RandomSource for SeededRandomSource {
    fn interarrival_time(&mut self) -> f64 {
        self.arrival.sample(&mut self.interarrival_rng)
    }

    fn customer_type_draw(&mut self) -> f64 {
        self.customer_type_rng.gen::<f64>()
    }

    fn service_time(&mut self) -> f64 {
        self.service.sample(&mut self.service_rng)
    }

    fn rest_draw(&mut self) -> f64 {
        self.rest_draw_rng.gen::<f64>()
    }

    fn rest_period(&mut self) -> f64 {
        self.rest.sample(&mut self.rest_period_rng)
    }
}
