//! Customers and their routing policy.

use crate::{CustomerId, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a customer picks a queue when no station is free.
///
/// Choosing a station to be served by is the same for both policies: the
/// first idle station wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerPolicy {
    /// Join the first queue that has room.
    #[default]
    Standard,

    /// Join the shortest queue that has room, lowest station index on ties.
    Greedy,
}

/// A customer moving through the simulation.
///
/// Immutable once created. Events carry copies of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Customer {
    /// Unique id; also the tie-break key for simultaneous events.
    pub id: CustomerId,

    /// When the customer first arrived.
    pub arrival_time: SimTime,

    /// Queue selection policy.
    pub policy: CustomerPolicy,
}

impl Customer {
    /// Create a customer with the standard policy.
    pub fn new(id: CustomerId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            policy: CustomerPolicy::Standard,
        }
    }

    /// Create a customer with the greedy policy.
    pub fn greedy(id: CustomerId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            policy: CustomerPolicy::Greedy,
        }
    }

    /// Set the routing policy.
    pub fn with_policy(mut self, policy: CustomerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check if this customer routes greedily.
    pub fn is_greedy(&self) -> bool {
        self.policy == CustomerPolicy::Greedy
    }

    /// Time spent since arrival, measured at `now`.
    pub fn waiting_time(&self, now: SimTime) -> f64 {
        now.since(self.arrival_time)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.policy {
            CustomerPolicy::Standard => write!(f, "{}", self.id),
            CustomerPolicy::Greedy => write!(f, "{}(greedy)", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_time() {
        let c = Customer::new(CustomerId(1), SimTime::new(1.25));
        assert_eq!(c.waiting_time(SimTime::new(4.0)), 2.75);
        assert_eq!(c.waiting_time(c.arrival_time), 0.0);
    }

    #[test]
    fn test_display_marks_greedy() {
        let standard = Customer::new(CustomerId(4), SimTime::ZERO);
        let greedy = Customer::greedy(CustomerId(5), SimTime::ZERO);
        assert_eq!(standard.to_string(), "4");
        assert_eq!(greedy.to_string(), "5(greedy)");
        assert!(greedy.is_greedy());
        assert!(!standard.is_greedy());
    }
}
