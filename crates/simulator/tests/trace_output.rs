//! End-to-end tests of the simulator's text output.

use queuesim_simulator::{Simulator, SimulatorConfig};
use tracing_test::traced_test;

const PHRASES: [&str; 5] = [
    "arrives",
    "served by",
    "leaves",
    "done serving by",
    "waits to be served by",
];

fn run(config: SimulatorConfig) -> String {
    Simulator::new(config)
        .expect("valid config")
        .run_to_string()
        .expect("run should succeed")
}

/// Check one trace line: `<time> <id>[(greedy)] <phrase>[ <station>]`.
fn assert_trace_line(line: &str) {
    let (time, rest) = line.split_once(' ').expect("time field");
    let (whole, fraction) = time.split_once('.').expect("decimal time");
    assert!(whole.parse::<u64>().is_ok(), "bad time in {:?}", line);
    assert_eq!(fraction.len(), 3, "time needs three decimals: {:?}", line);

    let (customer, rest) = rest.split_once(' ').expect("customer field");
    let id = customer.strip_suffix("(greedy)").unwrap_or(customer);
    assert!(id.parse::<u32>().is_ok(), "bad customer in {:?}", line);

    let phrase = PHRASES
        .iter()
        .filter(|phrase| rest.starts_with(*phrase))
        .max_by_key(|phrase| phrase.len())
        .unwrap_or_else(|| panic!("unknown phrase in {:?}", line));
    let station = rest[phrase.len()..].trim();
    match *phrase {
        "arrives" | "leaves" => assert!(station.is_empty(), "{:?}", line),
        _ => assert!(
            station.starts_with("server ") || station.starts_with("self-check "),
            "bad station in {:?}",
            line
        ),
    }
}

#[test]
fn test_classic_input_produces_well_formed_trace() {
    let config = SimulatorConfig::parse_whitespace("1 2 1 2 30 1.0 1.0 0.1 0.2 0.3").unwrap();
    let output = run(config);
    let lines: Vec<&str> = output.lines().collect();
    let (summary, trace) = lines.split_last().unwrap();

    for line in trace {
        assert_trace_line(line);
    }
    assert!(!output.contains("resting"), "rest events must not be printed");

    // Every customer arrives exactly once.
    let arrivals = trace.iter().filter(|l| l.ends_with(" arrives")).count();
    assert_eq!(arrivals, 30);

    // The summary agrees with the trace.
    let inner = summary.strip_prefix('[').and_then(|s| s.strip_suffix(']')).unwrap();
    let fields: Vec<&str> = inner.split(' ').collect();
    assert_eq!(fields.len(), 3);
    let served: usize = fields[1].parse().unwrap();
    let left: usize = fields[2].parse().unwrap();
    let started = trace
        .iter()
        .filter(|line| line.split(' ').nth(2) == Some("served"))
        .count();
    assert_eq!(served, started);
    assert_eq!(left, trace.iter().filter(|l| l.ends_with(" leaves")).count());
    assert_eq!(served + left, 30);
}

#[test]
fn test_trace_is_chronological() {
    let config = SimulatorConfig::new(1, 2)
        .with_seed(11)
        .with_customers(50)
        .with_rest(0.5, 0.5)
        .with_greedy_probability(0.5);
    let output = run(config);

    let times: Vec<f64> = output
        .lines()
        .filter(|line| !line.starts_with('['))
        .map(|line| line.split(' ').next().unwrap().parse().unwrap())
        .collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[traced_test]
#[test]
fn test_same_seed_same_output() {
    let config = SimulatorConfig::new(2, 2)
        .with_seed(2024)
        .with_customers(80)
        .with_rest(1.0, 0.25)
        .with_greedy_probability(0.4);

    let first = run(config.clone());
    let second = run(config.clone());
    assert_eq!(first, second);

    let other = run(config.with_seed(2025));
    assert_ne!(first, other);
}

#[test]
fn test_zero_capacity_single_server() {
    // With no queue, customers who arrive while the server is busy leave.
    let config = SimulatorConfig::new(1, 0)
        .with_seed(5)
        .with_customers(40)
        .with_max_queue_length(0)
        .with_rates(2.0, 0.5);
    let output = run(config);

    assert!(!output.contains("waits to be served by"));
    assert!(output.contains(" leaves"));
}
