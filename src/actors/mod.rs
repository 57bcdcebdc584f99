//! Hand-written services: the seat registry and its occupancy simulator.

pub mod seat_registry;
pub mod simulator;

pub use seat_registry::*;
pub use simulator::*;
