//! The station roster.
//!
//! Owns every station and every waiting queue. Queues are stored once in
//! an arena; stations refer to them by slot, so the shared queue used by
//! self-checkouts exists exactly once no matter how many self-checkouts
//! there are.

use crate::routing::{RosterSummary, StationStatus};
use crate::station::{QueueSlot, Station, StationMut, StationView, WaitingQueue};
use queuesim_types::{StationId, StationKind};

/// All stations of a simulation, in routing order.
///
/// Dedicated stations come first, shared-queue stations after them. Station
/// ids are 1-based and follow the same order.
#[derive(Debug, Clone)]
pub struct StationRoster {
    stations: Vec<Station>,
    queues: Vec<WaitingQueue>,
    shared_slot: Option<QueueSlot>,
}

impl StationRoster {
    /// Create a roster of `dedicated` staffed counters followed by
    /// `shared` self-checkouts, each with a maximum queue length of
    /// `max_queue_length`.
    pub fn new(dedicated: usize, shared: usize, max_queue_length: usize) -> Self {
        let mut roster = Self {
            stations: Vec::with_capacity(dedicated + shared),
            queues: Vec::with_capacity(dedicated + usize::from(shared > 0)),
            shared_slot: None,
        };
        for _ in 0..dedicated {
            roster.push(StationKind::Dedicated, max_queue_length);
        }
        for _ in 0..shared {
            roster.push(StationKind::SharedQueue, max_queue_length);
        }
        roster
    }

    /// Append a station of the given kind.
    ///
    /// Dedicated stations get a fresh queue; shared-queue stations join the
    /// shared queue, creating it on first use. The shared queue's capacity
    /// is fixed when it is created.
    fn push(&mut self, kind: StationKind, max_queue_length: usize) -> StationId {
        let slot = match kind {
            StationKind::Dedicated => self.new_queue(max_queue_length),
            StationKind::SharedQueue => match self.shared_slot {
                Some(slot) => slot,
                None => {
                    let slot = self.new_queue(max_queue_length);
                    self.shared_slot = Some(slot);
                    slot
                }
            },
        };
        let id = StationId(self.stations.len() as u32 + 1);
        self.stations.push(Station::new(id, kind, slot));
        id
    }

    fn new_queue(&mut self, capacity: usize) -> QueueSlot {
        self.queues.push(WaitingQueue::new(capacity));
        QueueSlot(self.queues.len() - 1)
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when there are no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Read-only handle to the station at `index`.
    pub fn station(&self, index: usize) -> Option<StationView<'_>> {
        let station = self.stations.get(index)?;
        let queue = &self.queues[station.queue_slot().0];
        Some(StationView::new(index, station, queue))
    }

    /// Mutable handle to the station at `index`.
    pub fn station_mut(&mut self, index: usize) -> Option<StationMut<'_>> {
        let station = self.stations.get_mut(index)?;
        let queue = &mut self.queues[station.queue_slot().0];
        Some(StationMut::new(index, station, queue))
    }

    /// All stations in routing order.
    pub fn iter(&self) -> impl Iterator<Item = StationView<'_>> + '_ {
        (0..self.stations.len()).filter_map(move |index| self.station(index))
    }

    /// Length of the shared queue, if any self-checkouts exist.
    pub fn shared_queue_length(&self) -> Option<usize> {
        self.shared_slot.map(|slot| self.queues[slot.0].len())
    }

    /// Total customers waiting across all queues.
    ///
    /// The shared queue counts once.
    pub fn total_waiting(&self) -> usize {
        self.queues.iter().map(|queue| queue.len()).sum()
    }

    /// Snapshot of every station's state for routing.
    ///
    /// Idle stations are `Available`; occupied stations whose queue is at
    /// capacity are `Full`; the rest report their queue length.
    pub fn summary(&self) -> RosterSummary {
        self.iter()
            .map(|station| {
                if station.can_serve() {
                    StationStatus::Available
                } else if !station.can_enqueue() {
                    StationStatus::Full
                } else {
                    StationStatus::Waiting(station.queue_length())
                }
            })
            .collect()
    }
}
