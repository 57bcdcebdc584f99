//! # Check-in kiosk core
//!
//! Reception desk logic for a lounge: a seat registry with live occupancy,
//! a visitor roster and the mode-gated check-in drawer.
//!
//! Every stateful piece runs as an actor owning its data:
//!
//! - [`actor_framework`]: generic `ResourceActor<T>` for CRUD-plus-actions entities
//!   (visitors and check-in sessions).
//! - [`actors`]: the hand-written seat registry service and the occupancy simulator.
//! - [`clients`]: cloneable handles; `CheckInClient` orchestrates sessions, roster and seats.
//! - [`app_system`]: configuration, tracing setup and the `KioskSystem` lifecycle.

pub mod actor_framework;
pub mod actors;
pub mod app_system;
pub mod checkin_actor;
pub mod clients;
pub mod customer_actor;
pub mod domain;
pub mod error;
pub mod messages;

#[cfg(test)]
mod mock_framework;
