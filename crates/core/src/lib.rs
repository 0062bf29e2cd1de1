//! Core types for the queue simulator.
//!
//! - [`Event`]: immutable records of what happened to a customer, with
//!   transition constructors that produce successor events
//! - [`RandomSource`]: the collaborator that supplies every random timing
//!   and decision draw
//! - Error types for station faults, routing misses, and engine faults

mod error;
mod event;
mod traits;

pub use error::{RoutingError, SimulationError, StationError};
pub use event::{Event, EventOrder, EventStatus};
pub use traits::RandomSource;
