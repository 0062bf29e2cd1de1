//! Roster summary and customer routing.
//!
//! Routing only ever sees a [`RosterSummary`]: one abstract status per
//! station, with no hint of whether a queue length comes from a private
//! queue or the shared one.

use queuesim_core::RoutingError;
use queuesim_types::CustomerPolicy;

/// Routing-relevant state of one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationStatus {
    /// Idle; can serve immediately.
    Available,

    /// Busy and its queue is at capacity.
    Full,

    /// Busy with this many customers waiting.
    Waiting(usize),
}

impl StationStatus {
    /// Queue length a waiting customer would join behind, or `None` if full.
    fn queue_length(&self) -> Option<usize> {
        match self {
            StationStatus::Available => Some(0),
            StationStatus::Full => None,
            StationStatus::Waiting(len) => Some(*len),
        }
    }
}

/// Snapshot of all stations, in roster order.
///
/// Built fresh for every arrival and never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSummary {
    entries: Vec<StationStatus>,
}

impl RosterSummary {
    /// Create a summary from statuses in roster order.
    pub fn new(entries: Vec<StationStatus>) -> Self {
        Self { entries }
    }

    /// Per-station statuses.
    pub fn entries(&self) -> &[StationStatus] {
        &self.entries
    }

    /// Index of the first idle station.
    pub fn serving_index(&self) -> Result<usize, RoutingError> {
        self.entries
            .iter()
            .position(|status| *status == StationStatus::Available)
            .ok_or(RoutingError::NoStationAvailable)
    }

    /// Index of the first station whose queue has room.
    pub fn first_waiting_index(&self) -> Result<usize, RoutingError> {
        self.entries
            .iter()
            .position(|status| *status != StationStatus::Full)
            .ok_or(RoutingError::NoRoomToWait)
    }

    /// Index of the shortest queue with room.
    ///
    /// Scans left to right from the first non-full entry and moves only on a
    /// strictly shorter queue, so the lowest index wins among equals.
    pub fn shortest_waiting_index(&self) -> Result<usize, RoutingError> {
        let start = self.first_waiting_index()?;
        let mut best = start;
        let mut best_len = self.entries[start].queue_length().unwrap_or(usize::MAX);

        for (index, status) in self.entries.iter().enumerate().skip(start + 1) {
            if let Some(len) = status.queue_length() {
                if len < best_len {
                    best = index;
                    best_len = len;
                }
            }
        }
        Ok(best)
    }

    /// Index of the station a customer with `policy` waits at.
    pub fn waiting_index(&self, policy: CustomerPolicy) -> Result<usize, RoutingError> {
        match policy {
            CustomerPolicy::Standard => self.first_waiting_index(),
            CustomerPolicy::Greedy => self.shortest_waiting_index(),
        }
    }
}

impl FromIterator<StationStatus> for RosterSummary {
    fn from_iter<I: IntoIterator<Item = StationStatus>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
