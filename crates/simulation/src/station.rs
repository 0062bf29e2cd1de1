//! Station model.
//!
//! A [`Station`] owns its occupant but not its queue. Queues live in the
//! roster's queue arena and each station holds the index of the one it
//! draws from: every dedicated station has its own slot, all shared-queue
//! stations point at the same slot. Capacity belongs to the queue, so every
//! station sharing a queue sees the same bound.
//!
//! [`StationMut`] and [`StationView`] pair a station with its queue so
//! callers get the full station operations without touching the arena.

use queuesim_core::{RandomSource, StationError};
use queuesim_types::{Customer, StationId, StationKind, StationRef};
use std::collections::VecDeque;

/// Index of a queue in the roster's queue arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct QueueSlot(pub(crate) usize);

/// Bounded FIFO of waiting customers.
#[derive(Debug, Clone)]
pub(crate) struct WaitingQueue {
    customers: VecDeque<Customer>,
    capacity: usize,
}

impl WaitingQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            customers: VecDeque::new(),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.customers.len()
    }

    fn has_room(&self) -> bool {
        self.customers.len() < self.capacity
    }
}

/// A service point.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    kind: StationKind,
    /// Customer currently being served. `None` means idle.
    occupant: Option<Customer>,
    queue: QueueSlot,
}

impl Station {
    pub(crate) fn new(id: StationId, kind: StationKind, queue: QueueSlot) -> Self {
        Self {
            id,
            kind,
            occupant: None,
            queue,
        }
    }

    pub(crate) fn queue_slot(&self) -> QueueSlot {
        self.queue
    }
}

/// Read-only handle to a station and its queue.
#[derive(Debug, Clone, Copy)]
pub struct StationView<'a> {
    index: usize,
    station: &'a Station,
    queue: &'a WaitingQueue,
}

impl<'a> StationView<'a> {
    pub(crate) fn new(index: usize, station: &'a Station, queue: &'a WaitingQueue) -> Self {
        Self {
            index,
            station,
            queue,
        }
    }

    /// Reference carried by events.
    pub fn station_ref(&self) -> StationRef {
        StationRef {
            index: self.index,
            id: self.station.id,
            kind: self.station.kind,
        }
    }

    /// Station id.
    pub fn id(&self) -> StationId {
        self.station.id
    }

    /// Station kind.
    pub fn kind(&self) -> StationKind {
        self.station.kind
    }

    /// Customer being served, if any.
    pub fn occupant(&self) -> Option<&'a Customer> {
        self.station.occupant.as_ref()
    }

    /// True when idle.
    pub fn can_serve(&self) -> bool {
        self.station.occupant.is_none()
    }

    /// Number of customers in the queue this station draws from.
    pub fn queue_length(&self) -> usize {
        self.queue.len()
    }

    /// Maximum queue length.
    pub fn capacity(&self) -> usize {
        self.queue.capacity
    }

    /// True when the queue has room for one more customer.
    pub fn can_enqueue(&self) -> bool {
        self.queue.has_room()
    }
}

/// Mutable handle to a station and its queue.
#[derive(Debug)]
pub struct StationMut<'a> {
    index: usize,
    station: &'a mut Station,
    queue: &'a mut WaitingQueue,
}

impl<'a> StationMut<'a> {
    pub(crate) fn new(index: usize, station: &'a mut Station, queue: &'a mut WaitingQueue) -> Self {
        Self {
            index,
            station,
            queue,
        }
    }

    /// Reborrow as a read-only view.
    pub fn view(&self) -> StationView<'_> {
        StationView::new(self.index, &*self.station, &*self.queue)
    }

    /// Reference carried by events.
    pub fn station_ref(&self) -> StationRef {
        self.view().station_ref()
    }

    /// True when idle.
    pub fn can_serve(&self) -> bool {
        self.station.occupant.is_none()
    }

    /// Start serving `customer`.
    ///
    /// Fails if the station is already occupied.
    pub fn serve(&mut self, customer: Customer) -> Result<(), StationError> {
        if let Some(current) = self.station.occupant {
            return Err(StationError::AlreadyServing {
                station: self.station.id,
                customer: current.id,
            });
        }
        self.station.occupant = Some(customer);
        Ok(())
    }

    /// Number of customers in the queue this station draws from.
    pub fn queue_length(&self) -> usize {
        self.queue.len()
    }

    /// True when the queue has room for one more customer.
    pub fn can_enqueue(&self) -> bool {
        self.queue.has_room()
    }

    /// Append `customer` to the tail of the queue.
    pub fn enqueue(&mut self, customer: Customer) -> Result<(), StationError> {
        if !self.can_enqueue() {
            return Err(StationError::QueueFull {
                station: self.station.id,
                capacity: self.queue.capacity,
            });
        }
        self.queue.customers.push_back(customer);
        Ok(())
    }

    /// Take the head of the queue and make it the new occupant.
    ///
    /// Replaces whoever was being served; callers use this when the
    /// previous customer has finished.
    pub fn dequeue_next(&mut self) -> Result<Customer, StationError> {
        let next = self.queue.customers.pop_front().ok_or(StationError::QueueEmpty {
            station: self.station.id,
        })?;
        self.station.occupant = Some(next);
        Ok(next)
    }

    /// Mark the station idle.
    pub fn clear(&mut self) {
        self.station.occupant = None;
    }

    /// Decide whether the station rests after finishing a customer.
    ///
    /// Dedicated stations consume one rest draw and rest when it falls below
    /// `rest_probability`. Shared-queue stations never rest and draw nothing.
    pub fn decides_to_rest(&self, random: &mut dyn RandomSource, rest_probability: f64) -> bool {
        if !self.station.kind.can_rest() {
            return false;
        }
        random.rest_draw() < rest_probability
    }
}
