//! Deterministic simulation runner.
//!
//! The runner owns the event queue and the station roster. Each step pops
//! the earliest event, updates station state and schedules whatever
//! follows from it.

use crate::event_queue::EventQueue;
use crate::roster::StationRoster;
use queuesim_core::{Event, EventStatus, RandomSource, SimulationError};
use queuesim_types::{Customer, CustomerId, CustomerPolicy, SimTime, ThreeDecimals};
use std::fmt;
use tracing::{debug, info, trace};

/// Deterministic simulation runner.
///
/// Processes events in `(time, customer, status)` order. Given the same
/// random source and roster, produces identical results every run.
pub struct SimulationRunner {
    /// All stations and their queues.
    roster: StationRoster,

    /// Pending events, ordered deterministically.
    event_queue: EventQueue,

    /// Source of service times, rest decisions and rest periods.
    random: Box<dyn RandomSource>,

    /// Threshold below which a rest draw sends a station on rest.
    rest_probability: f64,

    /// Current simulation time.
    now: SimTime,

    /// Id for the next scheduled customer.
    next_customer: CustomerId,

    /// Arrival time of the last scheduled customer.
    last_arrival: Option<SimTime>,

    /// Statistics.
    stats: SimulationStats,
}

/// Statistics collected during simulation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimulationStats {
    /// Sum of waiting times of customers who queued and were then served.
    pub total_waiting_time: f64,
    /// Customers who started service.
    pub customers_served: u64,
    /// Customers who left without being served.
    pub customers_left: u64,
    /// Total events processed, including rest events.
    pub events_processed: u64,
    /// Rests taken by dedicated stations.
    pub rests_taken: u64,
}

impl SimulationStats {
    /// Mean waiting time over served customers; zero if nobody was served.
    pub fn average_waiting_time(&self) -> f64 {
        if self.customers_served == 0 {
            0.0
        } else {
            self.total_waiting_time / self.customers_served as f64
        }
    }
}

/// Summary line: `[<average wait> <served> <left>]`.
impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {}]",
            ThreeDecimals(self.average_waiting_time()),
            self.customers_served,
            self.customers_left
        )
    }
}

impl SimulationRunner {
    /// Create a runner over `roster`, drawing from `random`.
    pub fn new(
        roster: StationRoster,
        random: impl RandomSource + 'static,
        rest_probability: f64,
    ) -> Self {
        info!(
            stations = roster.len(),
            rest_probability, "Created simulation runner"
        );

        Self {
            roster,
            event_queue: EventQueue::new(),
            random: Box::new(random),
            rest_probability,
            now: SimTime::ZERO,
            next_customer: CustomerId(1),
            last_arrival: None,
            stats: SimulationStats::default(),
        }
    }

    /// Get simulation statistics.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Get current simulation time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Get the station roster.
    pub fn roster(&self) -> &StationRoster {
        &self.roster
    }

    /// Number of events still to process.
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    /// Schedule the arrival of a specific customer.
    pub fn schedule_arrival(&mut self, customer: Customer) {
        if customer.id >= self.next_customer {
            self.next_customer = customer.id.next();
        }
        if self.last_arrival.map_or(true, |last| customer.arrival_time > last) {
            self.last_arrival = Some(customer.arrival_time);
        }
        self.event_queue.push(Event::arrival(customer));
    }

    /// Generate and schedule `count` arrivals.
    ///
    /// The first customer of a fresh runner arrives at time zero; every
    /// later one arrives an interarrival gap after the previous. Once all
    /// times are drawn, each customer takes one type draw, in id order, and
    /// is greedy when it falls below `greedy_probability`.
    pub fn schedule_arrivals(&mut self, count: usize, greedy_probability: f64) {
        let mut times = Vec::with_capacity(count);
        let mut last = self.last_arrival;
        for _ in 0..count {
            let at = match last {
                None => SimTime::ZERO,
                Some(previous) => previous.after(self.random.interarrival_time()),
            };
            times.push(at);
            last = Some(at);
        }

        for at in times {
            let policy = if self.random.customer_type_draw() < greedy_probability {
                CustomerPolicy::Greedy
            } else {
                CustomerPolicy::Standard
            };
            let customer = Customer::new(self.next_customer, at).with_policy(policy);
            self.schedule_arrival(customer);
        }

        debug!(
            count,
            pending = self.event_queue.len(),
            "Scheduled arrivals"
        );
    }

    /// Process the next event.
    ///
    /// Returns the processed event, or `None` when the queue is empty.
    pub fn step(&mut self) -> Result<Option<Event>, SimulationError> {
        let Some(event) = self.event_queue.pop() else {
            return Ok(None);
        };
        self.now = event.time();
        self.stats.events_processed += 1;

        trace!(
            time = %self.now,
            customer = %event.customer(),
            status = ?event.status(),
            "Processing event"
        );

        match event.status() {
            EventStatus::Arrives => self.handle_arrival(&event)?,
            EventStatus::Served => self.handle_served(&event),
            EventStatus::Leaves => self.stats.customers_left += 1,
            EventStatus::Waits => {}
            EventStatus::Done | EventStatus::StationRests => self.handle_station_free(&event)?,
        }

        Ok(Some(event))
    }

    /// Run until no events remain, passing every processed event to
    /// `observer`.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<&SimulationStats, SimulationError>
    where
        F: FnMut(&Event),
    {
        while let Some(event) = self.step()? {
            observer(&event);
        }

        info!(
            events_processed = self.stats.events_processed,
            served = self.stats.customers_served,
            left = self.stats.customers_left,
            final_time = %self.now,
            "Simulation complete"
        );
        Ok(&self.stats)
    }

    /// Run until no events remain.
    pub fn run(&mut self) -> Result<&SimulationStats, SimulationError> {
        self.run_with(|_| {})
    }

    /// Serve at the first idle station, else wait, else leave.
    fn handle_arrival(&mut self, event: &Event) -> Result<(), SimulationError> {
        let customer = *event.customer();
        let summary = self.roster.summary();

        let next = if let Ok(index) = summary.serving_index() {
            let mut station = self
                .roster
                .station_mut(index)
                .ok_or(SimulationError::UnknownStation(index))?;
            station.serve(customer)?;
            debug!(customer = %customer, station = %station.station_ref(), "Serving on arrival");
            event.served_by(station.station_ref())
        } else if let Ok(index) = summary.waiting_index(customer.policy) {
            let mut station = self
                .roster
                .station_mut(index)
                .ok_or(SimulationError::UnknownStation(index))?;
            station.enqueue(customer)?;
            debug!(
                customer = %customer,
                station = %station.station_ref(),
                queue_length = station.queue_length(),
                "Waiting"
            );
            event.waits_at(station.station_ref())
        } else {
            debug!(customer = %customer, "No room, leaving");
            event.leaves()
        };

        self.event_queue.push(next);
        Ok(())
    }

    fn handle_served(&mut self, event: &Event) {
        let service_time = self.random.service_time();
        self.stats.customers_served += 1;
        self.event_queue.push(event.done_after(service_time));
    }

    /// A station finished a customer or came back from rest.
    ///
    /// After `Done` the rest decision comes first; a resting station keeps
    /// its queue untouched until the rest event fires.
    fn handle_station_free(&mut self, event: &Event) -> Result<(), SimulationError> {
        let station_ref = event.station().ok_or(SimulationError::MissingStation {
            customer: event.customer().id,
            status: event.status(),
        })?;
        let mut station = self
            .roster
            .station_mut(station_ref.index)
            .ok_or(SimulationError::UnknownStation(station_ref.index))?;

        if event.status() == EventStatus::Done
            && station.decides_to_rest(self.random.as_mut(), self.rest_probability)
        {
            let rest_time = self.random.rest_period();
            self.stats.rests_taken += 1;
            debug!(station = %station_ref, rest_time, "Station resting");
            self.event_queue.push(event.rests_for(rest_time));
            return Ok(());
        }

        if station.queue_length() > 0 {
            let customer = station.dequeue_next()?;
            let next = event.serves_next(customer, station_ref);
            self.stats.total_waiting_time += next.customer_waiting_time();
            self.event_queue.push(next);
        } else {
            station.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_test_helpers::ScriptedRandomSource;
    use tracing_test::traced_test;

    fn customer(id: u32, at: f64) -> Customer {
        Customer::new(CustomerId(id), SimTime::new(at))
    }

    #[test]
    fn test_empty_runner_finishes_immediately() {
        let mut runner =
            SimulationRunner::new(StationRoster::new(1, 0, 1), ScriptedRandomSource::new(), 0.0);
        assert_eq!(runner.step(), Ok(None));
        let stats = runner.run().unwrap();
        assert_eq!(stats, &SimulationStats::default());
        assert_eq!(stats.to_string(), "[0.000 0 0]");
    }

    #[test]
    fn test_schedule_arrivals_times_and_ids() {
        let random = ScriptedRandomSource::new()
            .with_interarrival_times([1.0, 0.5])
            .with_customer_type_draws([0.9, 0.1, 0.5]);
        let mut runner = SimulationRunner::new(StationRoster::new(3, 0, 0), random, 0.0);
        runner.schedule_arrivals(3, 0.5);
        assert_eq!(runner.pending_events(), 3);

        let mut arrivals = Vec::new();
        runner
            .run_with(|event| {
                if event.status() == EventStatus::Arrives {
                    arrivals.push(event.to_string());
                }
            })
            .unwrap();
        assert_eq!(
            arrivals,
            vec!["0.000 1 arrives", "1.000 2(greedy) arrives", "1.500 3 arrives"]
        );
    }

    #[test]
    fn test_schedule_arrivals_continues_ids_and_times() {
        let random = ScriptedRandomSource::new().with_interarrival_time(2.0);
        let mut runner = SimulationRunner::new(StationRoster::new(1, 0, 5), random, 0.0);
        runner.schedule_arrival(customer(4, 3.0));
        runner.schedule_arrivals(1, 0.0);

        let mut last = None;
        runner
            .run_with(|event| {
                if event.status() == EventStatus::Arrives {
                    last = Some((event.customer().id, event.time()));
                }
            })
            .unwrap();
        assert_eq!(last, Some((CustomerId(5), SimTime::new(5.0))));
    }

    #[test]
    fn test_served_event_schedules_done() {
        let random = ScriptedRandomSource::new().with_service_time(2.5);
        let mut runner = SimulationRunner::new(StationRoster::new(1, 0, 1), random, 0.0);
        runner.schedule_arrival(customer(1, 1.0));

        let arrival = runner.step().unwrap().unwrap();
        assert_eq!(arrival.status(), EventStatus::Arrives);
        let served = runner.step().unwrap().unwrap();
        assert_eq!(served.status(), EventStatus::Served);
        assert_eq!(runner.stats().customers_served, 1);

        let done = runner.step().unwrap().unwrap();
        assert_eq!(done.status(), EventStatus::Done);
        assert_eq!(done.time(), SimTime::new(3.5));
        assert_eq!(runner.now(), SimTime::new(3.5));
        assert!(runner.roster().station(0).unwrap().can_serve());
        assert_eq!(runner.step(), Ok(None));
    }

    #[test]
    fn test_rest_preempts_next_customer() {
        let random = ScriptedRandomSource::new()
            .with_service_time(1.0)
            .with_rest_draws([0.0, 1.0, 1.0])
            .with_rest_period(4.0);
        let mut runner = SimulationRunner::new(StationRoster::new(1, 0, 1), random, 0.5);
        runner.schedule_arrival(customer(1, 0.0));
        runner.schedule_arrival(customer(2, 0.0));

        let mut events = Vec::new();
        let stats = runner.run_with(|event| events.push(*event)).unwrap().clone();

        let rest = events
            .iter()
            .position(|e| e.status() == EventStatus::StationRests)
            .unwrap();
        assert_eq!(events[rest].time(), SimTime::new(5.0));
        assert_eq!(events[rest].customer().id, CustomerId(1));

        // Customer 2 only starts once the rest is over.
        let next = &events[rest + 1];
        assert_eq!(next.status(), EventStatus::Served);
        assert_eq!(next.customer().id, CustomerId(2));
        assert_eq!(next.time(), SimTime::new(5.0));

        assert_eq!(stats.rests_taken, 1);
        assert_eq!(stats.to_string(), "[2.500 2 0]");
    }

    #[test]
    fn test_shared_stations_never_draw_rest() {
        let random = ScriptedRandomSource::new().with_rest_draw(0.0);
        let counts = random.counts();
        let mut runner = SimulationRunner::new(StationRoster::new(0, 2, 1), random, 1.0);
        runner.schedule_arrival(customer(1, 0.0));
        runner.schedule_arrival(customer(2, 0.0));
        runner.run().unwrap();

        assert_eq!(counts.borrow().rest_draws, 0);
        assert_eq!(runner.stats().rests_taken, 0);
    }

    #[test]
    fn test_empty_roster_customers_leave() {
        let mut runner =
            SimulationRunner::new(StationRoster::new(0, 0, 0), ScriptedRandomSource::new(), 0.0);
        runner.schedule_arrival(customer(1, 0.0));
        runner.step().unwrap();
        let leave = runner.step().unwrap().unwrap();
        assert_eq!(leave.status(), EventStatus::Leaves);
        assert_eq!(runner.stats().customers_left, 1);
    }

    #[test]
    fn test_average_waiting_time() {
        let stats = SimulationStats {
            total_waiting_time: 7.5,
            customers_served: 3,
            ..Default::default()
        };
        assert!((stats.average_waiting_time() * 3.0 - 7.5).abs() < 1e-9);
        assert_eq!(stats.to_string(), "[2.500 3 0]");
        assert_eq!(SimulationStats::default().average_waiting_time(), 0.0);
    }

    #[traced_test]
    #[test]
    fn test_run_logs_completion() {
        let mut runner =
            SimulationRunner::new(StationRoster::new(1, 0, 0), ScriptedRandomSource::new(), 0.0);
        runner.schedule_arrival(customer(1, 0.0));
        runner.schedule_arrival(customer(2, 0.0));
        runner.run().unwrap();

        assert!(logs_contain("Created simulation runner"));
        assert!(logs_contain("No room, leaving"));
        assert!(logs_contain("Simulation complete"));
    }
}
