//! Cloneable handles for talking to the services.

#[macro_use]
mod macros;

pub mod checkin_client;
pub mod customer_client;
pub mod seat_client;

pub use checkin_client::CheckInClient;
pub use customer_client::CustomerClient;
pub use seat_client::SeatClient;
