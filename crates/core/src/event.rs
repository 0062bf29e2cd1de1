//! Simulation events.
//!
//! An [`Event`] records one thing that happened to one customer at one
//! logical time. Events are never mutated: each transition constructor
//! (`served_by`, `waits_at`, `done_after`, ...) builds the successor event
//! from the current one.

use queuesim_types::{Customer, CustomerId, SimTime, StationRef};
use std::fmt;

/// What an event represents.
///
/// Declaration order is the tie-break rank for events with the same time
/// and customer: `Arrives < Served < Leaves < Done < Waits < StationRests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventStatus {
    /// Customer arrives at the shop.
    Arrives,

    /// Customer starts being served at a station.
    Served,

    /// Customer leaves without being served.
    Leaves,

    /// Station finishes serving the customer.
    Done,

    /// Customer joins a station's queue.
    Waits,

    /// Station comes back from a rest.
    StationRests,
}

impl EventStatus {
    /// Phrase used in the event trace.
    pub fn phrase(&self) -> &'static str {
        match self {
            EventStatus::Arrives => "arrives",
            EventStatus::Served => "served by",
            EventStatus::Leaves => "leaves",
            EventStatus::Done => "done serving by",
            EventStatus::Waits => "waits to be served by",
            EventStatus::StationRests => "done resting by",
        }
    }

    /// Whether events of this status appear in the printed trace.
    ///
    /// Rest events are bookkeeping only.
    pub fn is_traced(&self) -> bool {
        !matches!(self, EventStatus::StationRests)
    }
}

/// Ordering key of an event: time, then customer id, then status rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventOrder {
    /// When the event happens.
    pub time: SimTime,
    /// Customer the event concerns.
    pub customer: CustomerId,
    /// Status rank.
    pub status: EventStatus,
}

/// A single simulation event.
///
/// For [`EventStatus::StationRests`] the customer is the one the station
/// finished serving before it went on rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    customer: Customer,
    station: Option<StationRef>,
    time: SimTime,
    status: EventStatus,
}

impl Event {
    /// Create the arrival event for a customer at its arrival time.
    pub fn arrival(customer: Customer) -> Self {
        Self {
            customer,
            station: None,
            time: customer.arrival_time,
            status: EventStatus::Arrives,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Transitions
    // ═══════════════════════════════════════════════════════════════════════

    /// This event's customer starts service at `station`, now.
    pub fn served_by(&self, station: StationRef) -> Self {
        self.successor(self.customer, Some(station), self.time, EventStatus::Served)
    }

    /// A waiting `customer` starts service at `station`, now.
    ///
    /// Used when a station finishes (or returns from rest) and pulls the
    /// head of its queue.
    pub fn serves_next(&self, customer: Customer, station: StationRef) -> Self {
        self.successor(customer, Some(station), self.time, EventStatus::Served)
    }

    /// This event's customer joins the queue at `station`, now.
    pub fn waits_at(&self, station: StationRef) -> Self {
        self.successor(self.customer, Some(station), self.time, EventStatus::Waits)
    }

    /// This event's customer gives up and leaves, now.
    pub fn leaves(&self) -> Self {
        self.successor(self.customer, self.station, self.time, EventStatus::Leaves)
    }

    /// Service completes `service_time` after this event.
    pub fn done_after(&self, service_time: f64) -> Self {
        self.successor(
            self.customer,
            self.station,
            self.time.after(service_time),
            EventStatus::Done,
        )
    }

    /// The station returns from a rest of `rest_time` after this event.
    pub fn rests_for(&self, rest_time: f64) -> Self {
        self.successor(
            self.customer,
            self.station,
            self.time.after(rest_time),
            EventStatus::StationRests,
        )
    }

    fn successor(
        &self,
        customer: Customer,
        station: Option<StationRef>,
        time: SimTime,
        status: EventStatus,
    ) -> Self {
        Self {
            customer,
            station,
            time,
            status,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    /// The customer this event concerns.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// The station involved, if any. Arrivals and leaves have none.
    pub fn station(&self) -> Option<StationRef> {
        self.station
    }

    /// When this event happens.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// What this event represents.
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// Time the customer has spent since arriving, as of this event.
    pub fn customer_waiting_time(&self) -> f64 {
        self.customer.waiting_time(self.time)
    }

    /// Ordering key used by the event queue.
    pub fn order(&self) -> EventOrder {
        EventOrder {
            time: self.time,
            customer: self.customer.id,
            status: self.status,
        }
    }
}

/// One trace line: `<time> <customer> <phrase>[ <station>]`.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.time, self.customer, self.status.phrase())?;
        if let Some(station) = self.station {
            write!(f, " {}", station)?;
        }
        Ok(())
    }
}
