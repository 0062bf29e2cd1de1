//! Fixture builders for customers and station references.

use queuesim_types::{Customer, CustomerId, SimTime, StationId, StationKind, StationRef};

/// A standard customer arriving at `at`.
pub fn customer(id: u32, at: f64) -> Customer {
    Customer::new(CustomerId(id), SimTime::new(at))
}

/// A greedy customer arriving at `at`.
pub fn greedy_customer(id: u32, at: f64) -> Customer {
    Customer::greedy(CustomerId(id), SimTime::new(at))
}

/// `count` standard customers, ids from 1, all arriving at `at`.
pub fn simultaneous_customers(count: u32, at: f64) -> Vec<Customer> {
    (1..=count).map(|id| customer(id, at)).collect()
}

/// Reference to the dedicated station at roster `index`.
///
/// Ids are `index + 1`, matching a roster whose dedicated stations come
/// first.
pub fn server(index: usize) -> StationRef {
    StationRef {
        index,
        id: StationId(index as u32 + 1),
        kind: StationKind::Dedicated,
    }
}

/// Reference to the shared-queue station at roster `index`.
pub fn self_check(index: usize) -> StationRef {
    StationRef {
        index,
        id: StationId(index as u32 + 1),
        kind: StationKind::SharedQueue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_labels() {
        assert_eq!(server(0).to_string(), "server 1");
        assert_eq!(self_check(2).to_string(), "self-check 3");
        assert_eq!(greedy_customer(5, 0.0).to_string(), "5(greedy)");
    }

    #[test]
    fn test_simultaneous_customers() {
        let customers = simultaneous_customers(3, 2.0);
        let ids: Vec<u32> = customers.iter().map(|c| c.id.as_u32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(customers.iter().all(|c| c.arrival_time == SimTime::new(2.0)));
    }
}
