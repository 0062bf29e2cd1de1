//! Station kinds and lightweight station references.

use crate::StationId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of service point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    /// A staffed counter with its own private queue. May rest after
    /// finishing a customer.
    Dedicated,

    /// A self-checkout. All shared-queue stations draw from one common
    /// queue and never rest.
    SharedQueue,
}

impl StationKind {
    /// Label used in the event trace.
    pub fn label(&self) -> &'static str {
        match self {
            StationKind::Dedicated => "server",
            StationKind::SharedQueue => "self-check",
        }
    }

    /// Whether stations of this kind can take a rest.
    pub fn can_rest(&self) -> bool {
        matches!(self, StationKind::Dedicated)
    }
}

/// A copyable reference to a station, carried by events.
///
/// `index` is the station's position in the roster; `id` and `kind` are
/// kept alongside so an event can be rendered without a roster lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationRef {
    /// Position in the roster's station list.
    pub index: usize,

    /// Station id (1-based).
    pub id: StationId,

    /// Station kind.
    pub kind: StationKind,
}

impl fmt::Display for StationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.id)
    }
}
