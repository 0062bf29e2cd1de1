//! Test helpers for the queue simulator.
//!
//! This crate provides a [`ScriptedRandomSource`] that returns exactly the
//! values a test asks for, so scenario tests can pin every service time,
//! rest decision and arrival gap instead of depending on a seeded stream.
//!
//! # Example
//!
//! ```rust
//! use queuesim_core::RandomSource;
//! use queuesim_test_helpers::ScriptedRandomSource;
//!
//! let mut random = ScriptedRandomSource::new()
//!     .with_service_times([5.0, 2.0])
//!     .with_rest_draw(1.0);
//! let counts = random.counts();
//!
//! assert_eq!(random.service_time(), 5.0);
//! assert_eq!(random.service_time(), 2.0);
//! // Exhausted scripts repeat their last value.
//! assert_eq!(random.service_time(), 2.0);
//! assert_eq!(counts.borrow().service_times, 3);
//! ```

pub mod fixtures;

use queuesim_core::RandomSource;
use std::cell::RefCell;
use std::rc::Rc;

/// Value used by streams a test does not script.
///
/// With `1.0` every uniform draw sits at or above any probability
/// threshold: nobody is greedy and no station rests.
pub const DEFAULT_DRAW: f64 = 1.0;

/// A scripted sequence of values for one stream.
#[derive(Debug, Clone)]
struct Script {
    values: Vec<f64>,
    next: usize,
}

impl Script {
    fn fixed(value: f64) -> Self {
        Self::sequence(vec![value])
    }

    fn sequence(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "script needs at least one value");
        Self { values, next: 0 }
    }

    /// Next value; the last one repeats once the script runs out.
    fn draw(&mut self) -> f64 {
        let index = self.next.min(self.values.len() - 1);
        self.next += 1;
        self.values[index]
    }
}

/// How many times each stream was drawn from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawCounts {
    pub interarrival_times: usize,
    pub customer_type_draws: usize,
    pub service_times: usize,
    pub rest_draws: usize,
    pub rest_periods: usize,
}

/// [`RandomSource`] that replays scripted values.
///
/// Every stream defaults to [`DEFAULT_DRAW`]. Draw counts are shared
/// through [`ScriptedRandomSource::counts`] so a test can inspect them
/// after handing the source to a runner.
#[derive(Debug, Clone)]
pub struct ScriptedRandomSource {
    interarrival: Script,
    customer_type: Script,
    service: Script,
    rest_draw: Script,
    rest_period: Script,
    counts: Rc<RefCell<DrawCounts>>,
}

impl Default for ScriptedRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRandomSource {
    /// Create a source where every stream returns [`DEFAULT_DRAW`].
    pub fn new() -> Self {
        Self {
            interarrival: Script::fixed(DEFAULT_DRAW),
            customer_type: Script::fixed(DEFAULT_DRAW),
            service: Script::fixed(DEFAULT_DRAW),
            rest_draw: Script::fixed(DEFAULT_DRAW),
            rest_period: Script::fixed(DEFAULT_DRAW),
            counts: Rc::new(RefCell::new(DrawCounts::default())),
        }
    }

    /// Shared handle to the draw counters.
    pub fn counts(&self) -> Rc<RefCell<DrawCounts>> {
        Rc::clone(&self.counts)
    }

    /// Return `value` for every interarrival gap.
    pub fn with_interarrival_time(mut self, value: f64) -> Self {
        self.interarrival = Script::fixed(value);
        self
    }

    /// Script the interarrival gaps; the last value repeats.
    pub fn with_interarrival_times(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.interarrival = Script::sequence(values.into_iter().collect());
        self
    }

    /// Return `value` for every customer-type draw.
    pub fn with_customer_type_draw(mut self, value: f64) -> Self {
        self.customer_type = Script::fixed(value);
        self
    }

    /// Script the customer-type draws; the last value repeats.
    pub fn with_customer_type_draws(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.customer_type = Script::sequence(values.into_iter().collect());
        self
    }

    /// Return `value` for every service time.
    pub fn with_service_time(mut self, value: f64) -> Self {
        self.service = Script::fixed(value);
        self
    }

    /// Script the service times; the last value repeats.
    pub fn with_service_times(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.service = Script::sequence(values.into_iter().collect());
        self
    }

    /// Return `value` for every rest decision draw.
    pub fn with_rest_draw(mut self, value: f64) -> Self {
        self.rest_draw = Script::fixed(value);
        self
    }

    /// Script the rest decision draws; the last value repeats.
    pub fn with_rest_draws(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.rest_draw = Script::sequence(values.into_iter().collect());
        self
    }

    /// Return `value` for every rest period.
    pub fn with_rest_period(mut self, value: f64) -> Self {
        self.rest_period = Script::fixed(value);
        self
    }

    /// Script the rest periods; the last value repeats.
    pub fn with_rest_periods(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.rest_period = Script::sequence(values.into_iter().collect());
        self
    }
}

impl RandomSource for ScriptedRandomSource {
    fn interarrival_time(&mut self) -> f64 {
        self.counts.borrow_mut().interarrival_times += 1;
        self.interarrival.draw()
    }

    fn customer_type_draw(&mut self) -> f64 {
        self.counts.borrow_mut().customer_type_draws += 1;
        self.customer_type.draw()
    }

    fn service_time(&mut self) -> f64 {
        self.counts.borrow_mut().service_times += 1;
        self.service.draw()
    }

    fn rest_draw(&mut self) -> f64 {
        self.counts.borrow_mut().rest_draws += 1;
        self.rest_draw.draw()
    }

    fn rest_period(&mut self) -> f64 {
        self.counts.borrow_mut().rest_periods += 1;
        self.rest_period.draw()
    }
}
