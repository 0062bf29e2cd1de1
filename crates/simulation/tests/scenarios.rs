//! Scenario tests with scripted timings.
//!
//! Every scenario pins its random draws so the exact trace can be checked
//! line by line.

use queuesim_core::{Event, EventStatus};
use queuesim_simulation::{
    SeededRandomSource, SimulationRunner, SimulationStats, StationRoster, StationStatus,
    TimingRates,
};
use queuesim_test_helpers::fixtures::{customer, greedy_customer, simultaneous_customers};
use queuesim_test_helpers::ScriptedRandomSource;
use queuesim_types::{Customer, SimTime, StationKind};

/// Run to completion, returning the printed trace and final statistics.
fn run_trace(
    roster: StationRoster,
    random: ScriptedRandomSource,
    rest_probability: f64,
    customers: impl IntoIterator<Item = Customer>,
) -> (Vec<String>, SimulationStats) {
    let mut runner = SimulationRunner::new(roster, random, rest_probability);
    for c in customers {
        runner.schedule_arrival(c);
    }

    let mut trace = Vec::new();
    let stats = runner
        .run_with(|event| {
            if event.status().is_traced() {
                trace.push(event.to_string());
            }
        })
        .expect("simulation should not fault")
        .clone();
    (trace, stats)
}

#[test]
fn test_single_server_second_customer_waits() {
    let random = ScriptedRandomSource::new().with_service_time(5.0);
    let (trace, stats) = run_trace(
        StationRoster::new(1, 0, 1),
        random,
        0.5,
        simultaneous_customers(2, 0.0),
    );

    assert_eq!(
        trace,
        vec![
            "0.000 1 arrives",
            "0.000 1 served by server 1",
            "0.000 2 arrives",
            "0.000 2 waits to be served by server 1",
            "5.000 1 done serving by server 1",
            "5.000 2 served by server 1",
            "10.000 2 done serving by server 1",
        ]
    );
    assert_eq!(stats.customers_served, 2);
    assert_eq!(stats.customers_left, 0);
    assert_eq!(stats.total_waiting_time, 5.0);
    assert_eq!(stats.to_string(), "[2.500 2 0]");
}

#[test]
fn test_customer_leaves_when_no_room() {
    let random = ScriptedRandomSource::new().with_service_time(3.0);
    let (trace, stats) = run_trace(
        StationRoster::new(1, 0, 0),
        random,
        0.0,
        [customer(1, 0.0), customer(2, 1.0)],
    );

    assert!(trace.contains(&"1.000 2 leaves".to_string()), "trace: {:?}", trace);
    assert_eq!(stats.customers_left, 1);
    assert_eq!(stats.customers_served, 1);
    assert_eq!(stats.to_string(), "[0.000 1 1]");
}

#[test]
fn test_idle_self_checks_serve_at_first_index() {
    for c in [customer(1, 0.0), greedy_customer(1, 0.0)] {
        let (trace, _) = run_trace(
            StationRoster::new(0, 2, 1),
            ScriptedRandomSource::new(),
            0.0,
            [c],
        );
        assert_eq!(trace[1], format!("0.000 {} served by self-check 1", c));
    }
}

#[test]
fn test_greedy_joins_shortest_queue() {
    let random = ScriptedRandomSource::new().with_service_time(10.0);
    let (trace, _) = run_trace(
        StationRoster::new(2, 0, 2),
        random,
        0.0,
        [
            customer(1, 0.0),
            customer(2, 0.0),
            customer(3, 0.0),
            greedy_customer(4, 0.0),
            customer(5, 0.0),
        ],
    );

    let waits: Vec<&String> = trace.iter().filter(|line| line.contains("waits")).collect();
    assert_eq!(
        waits,
        vec![
            "0.000 3 waits to be served by server 1",
            "0.000 4(greedy) waits to be served by server 2",
            "0.000 5 waits to be served by server 1",
        ]
    );
}

#[test]
fn test_shared_queue_drains_to_first_free_self_check() {
    let random = ScriptedRandomSource::new().with_service_times([1.0, 3.0]);
    let (trace, stats) = run_trace(
        StationRoster::new(0, 2, 2),
        random,
        1.0,
        simultaneous_customers(3, 0.0),
    );

    assert_eq!(
        trace,
        vec![
            "0.000 1 arrives",
            "0.000 1 served by self-check 1",
            "0.000 2 arrives",
            "0.000 2 served by self-check 2",
            "0.000 3 arrives",
            "0.000 3 waits to be served by self-check 1",
            "1.000 1 done serving by self-check 1",
            "1.000 3 served by self-check 1",
            "3.000 2 done serving by self-check 2",
            "4.000 3 done serving by self-check 1",
        ]
    );
    assert_eq!(stats.rests_taken, 0, "self-checks never rest");
    assert_eq!(stats.to_string(), "[0.333 3 0]");
}

#[test]
fn test_shared_queue_is_visible_from_every_self_check() {
    let random = ScriptedRandomSource::new().with_service_time(10.0);
    let mut runner = SimulationRunner::new(StationRoster::new(1, 2, 1), random, 0.0);
    for c in simultaneous_customers(5, 0.0) {
        runner.schedule_arrival(c);
    }

    // Every customer arrives and is served or queued at t=0.
    for _ in 0..10 {
        runner.step().unwrap();
    }
    assert_eq!(runner.now(), SimTime::ZERO);

    // Three served. Customer 4 fills the server's queue, so customer 5 takes
    // the first non-full entry, which is the shared queue.
    let roster = runner.roster();
    assert_eq!(
        roster.summary().entries(),
        &[StationStatus::Full, StationStatus::Full, StationStatus::Full]
    );
    assert_eq!(roster.station(0).unwrap().queue_length(), 1);
    assert_eq!(roster.station(1).unwrap().queue_length(), 1);
    assert_eq!(roster.station(2).unwrap().queue_length(), 1);
    assert_eq!(roster.shared_queue_length(), Some(1));
    assert_eq!(roster.total_waiting(), 2);
}

#[test]
fn test_resting_server_keeps_queue_until_rest_ends() {
    let random = ScriptedRandomSource::new()
        .with_service_time(1.0)
        .with_rest_draws([0.0, 1.0])
        .with_rest_period(10.0);
    let counts = random.counts();
    let (trace, stats) = run_trace(
        StationRoster::new(1, 0, 1),
        random,
        0.5,
        [customer(1, 0.0), customer(2, 2.0)],
    );

    // The station is still busy while resting, so customer 2 queues.
    assert_eq!(
        trace,
        vec![
            "0.000 1 arrives",
            "0.000 1 served by server 1",
            "1.000 1 done serving by server 1",
            "2.000 2 arrives",
            "2.000 2 waits to be served by server 1",
            "11.000 2 served by server 1",
            "12.000 2 done serving by server 1",
        ]
    );
    assert_eq!(stats.rests_taken, 1);
    assert_eq!(stats.total_waiting_time, 9.0);
    assert_eq!(counts.borrow().rest_draws, 2);
    assert_eq!(counts.borrow().rest_periods, 1);
}

#[test]
fn test_rest_events_are_processed_but_not_traced() {
    let random = ScriptedRandomSource::new().with_rest_draw(0.0);
    let mut runner = SimulationRunner::new(StationRoster::new(1, 0, 0), random, 1.0);
    runner.schedule_arrival(customer(1, 0.0));

    let mut events: Vec<Event> = Vec::new();
    runner.run_with(|event| events.push(*event)).unwrap();

    let last = events.last().unwrap();
    assert_eq!(last.status(), EventStatus::StationRests);
    assert!(!last.status().is_traced());
    assert_eq!(last.customer().id.as_u32(), 1);
    assert!(runner.roster().station(0).unwrap().can_serve());
}

#[test]
fn test_station_invariants_hold_every_step() {
    let rates = TimingRates {
        arrival: 1.5,
        service: 1.0,
        rest: 0.5,
    };
    for seed in 0..20 {
        let random = SeededRandomSource::new(seed, rates).unwrap();
        let mut runner = SimulationRunner::new(StationRoster::new(2, 3, 2), random, 0.3);
        runner.schedule_arrivals(200, 0.4);

        let mut last_time = SimTime::ZERO;
        while let Some(event) = runner.step().unwrap() {
            assert!(event.time() >= last_time, "time went backwards at seed {}", seed);
            last_time = event.time();

            let roster = runner.roster();
            let shared = roster.shared_queue_length();
            for station in roster.iter() {
                assert!(station.queue_length() <= station.capacity());
                if station.kind() == StationKind::SharedQueue {
                    assert_eq!(Some(station.queue_length()), shared);
                }
                // Nobody waits at an idle station.
                if station.can_serve() {
                    assert_eq!(station.queue_length(), 0, "seed {}", seed);
                }
            }
        }

        let stats = runner.stats();
        assert_eq!(stats.customers_served + stats.customers_left, 200);
        assert_eq!(runner.roster().total_waiting(), 0);
        assert!(runner.roster().iter().all(|s| s.can_serve()));

        let average = stats.average_waiting_time();
        assert!((average * stats.customers_served as f64 - stats.total_waiting_time).abs() < 1e-6);
    }
}
