//! Collaborator traits.

/// Source of every random quantity the simulation consumes.
///
/// Each operation is an independent stream. The runner calls them in a
/// fixed pattern, so a deterministic implementation makes the whole run
/// reproducible:
///
/// - `interarrival_time` / `customer_type_draw`: once per customer at setup
/// - `service_time`: once per dispatched `Served` event
/// - `rest_draw`: once per `Done` event at a station that can rest
/// - `rest_period`: once per rest actually taken
///
/// # Example
///
/// ```ignore
/// struct Fixed;
///
/// impl RandomSource for Fixed {
///     fn interarrival_time(&mut self) -> f64 { 1.0 }
///     fn customer_type_draw(&mut self) -> f64 { 0.9 }
///     fn service_time(&mut self) -> f64 { 2.0 }
///     fn rest_draw(&mut self) -> f64 { 1.0 }
///     fn rest_period(&mut self) -> f64 { 0.5 }
/// }
/// ```
pub trait RandomSource {
    /// Gap between consecutive arrivals (`>= 0`).
    fn interarrival_time(&mut self) -> f64;

    /// Uniform draw in `[0, 1)` compared against the greedy probability.
    fn customer_type_draw(&mut self) -> f64;

    /// Service duration (`>= 0`).
    fn service_time(&mut self) -> f64;

    /// Uniform draw in `[0, 1)` compared against the rest probability.
    fn rest_draw(&mut self) -> f64;

    /// Rest duration (`>= 0`).
    fn rest_period(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn interarrival_time(&mut self) -> f64 {
        (**self).interarrival_time()
    }

    fn customer_type_draw(&mut self) -> f64 {
        (**self).customer_type_draw()
    }

    fn service_time(&mut self) -> f64 {
        (**self).service_time()
    }

    fn rest_draw(&mut self) -> f64 {
        (**self).rest_draw()
    }

    fn rest_period(&mut self) -> f64 {
        (**self).rest_period()
    }
}
