//! Deterministic queue simulation runner.
//!
//! This crate provides a fully deterministic discrete-event simulation of
//! customers moving through checkout stations. Given the same random source
//! seed, it produces identical traces and statistics every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationRunner                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Event Queue (BTreeMap<EventKey, Event>)        │ │
//! │  │     Ordered by: time, customer, status, sequence   │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     StationRoster                                  │ │
//! │  │     stations + queue arena (one shared queue)      │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ RosterSummary               │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Routing → successor events scheduled           │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod event_queue;
mod random;
mod roster;
mod routing;
mod runner;
mod station;

pub use event_queue::{EventKey, EventQueue};
pub use random::{InvalidRate, SeededRandomSource, TimingRates};
pub use roster::StationRoster;
pub use routing::{RosterSummary, StationStatus};
pub use runner::{SimulationRunner, SimulationStats};
pub use station::{Station, StationMut, StationView};
