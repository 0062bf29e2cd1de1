//! Error types for the simulation.

use crate::EventStatus;
use queuesim_types::{CustomerId, StationId};
use thiserror::Error;

/// Faults raised by station transitions.
///
/// Under correct dispatch none of these can happen; seeing one means the
/// engine's bookkeeping is broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationError {
    /// Asked to start serving while already occupied.
    #[error("station {station} is already serving customer {customer}")]
    AlreadyServing {
        station: StationId,
        customer: CustomerId,
    },

    /// Asked to enqueue into a queue at capacity.
    #[error("queue for station {station} is full (capacity {capacity})")]
    QueueFull { station: StationId, capacity: usize },

    /// Asked to dequeue from an empty queue.
    #[error("queue for station {station} is empty")]
    QueueEmpty { station: StationId },
}

/// Expected routing misses.
///
/// These drive the arrival branch (serve, else wait, else leave) and never
/// leave the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Every station is occupied.
    #[error("no station available")]
    NoStationAvailable,

    /// Every queue is at capacity.
    #[error("no room to wait")]
    NoRoomToWait,
}

/// Fatal engine faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A station transition violated its invariants.
    #[error("station fault: {0}")]
    Station(#[from] StationError),

    /// An event that needs a station did not carry one.
    #[error("{status:?} event for customer {customer} has no station")]
    MissingStation {
        customer: CustomerId,
        status: EventStatus,
    },

    /// An event referenced a station index outside the roster.
    #[error("station index {0} is out of range")]
    UnknownStation(usize),
}
