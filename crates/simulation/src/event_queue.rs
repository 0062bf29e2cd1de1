//! Event queue with deterministic ordering.

use queuesim_core::{Event, EventOrder};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Key for ordering events in the queue.
///
/// Events are ordered by:
/// 1. Time (earlier first)
/// 2. Customer id (lower first)
/// 3. Status rank (`Arrives < Served < Leaves < Done < Waits < StationRests`)
/// 4. Sequence number (FIFO for otherwise identical keys)
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EventKey {
    /// Time, customer and status of the event.
    pub order: EventOrder,
    /// Sequence number for deterministic FIFO ordering.
    pub sequence: u64,
}

impl EventKey {
    /// Create a new event key from an [`Event`].
    pub fn new(event: &Event, sequence: u64) -> Self {
        Self {
            order: event.order(),
            sequence,
        }
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order by time first
        match self.order.time.cmp(&other.order.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Then by customer (deterministic ordering)
        match self.order.customer.cmp(&other.order.customer) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Then by status rank
        match self.order.status.cmp(&other.order.status) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Finally by sequence (FIFO)
        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BTreeMap<EventKey, Event>,
    sequence: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event.
    pub fn push(&mut self, event: Event) -> EventKey {
        let key = EventKey::new(&event, self.sequence);
        self.sequence += 1;
        self.events.insert(key, event);
        key
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_first().map(|(_, event)| event)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
