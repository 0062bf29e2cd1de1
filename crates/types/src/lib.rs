//! Core types for the checkout queue simulator.
//!
//! Everything here is a small `Copy` value: identifiers, logical time,
//! customers and station references. Mutable simulation state lives in
//! `queuesim-simulation`.

mod customer;
mod identifiers;
mod station;
mod time;

pub use customer::{Customer, CustomerPolicy};
pub use identifiers::{CustomerId, StationId};
pub use station::{StationKind, StationRef};
pub use time::{SimTime, ThreeDecimals};
