//! Business domain entities. Pure data with no actor concerns.

pub mod customer;
pub mod drink;
pub mod mode;
pub mod order;
pub mod seat;
pub mod session;

pub use customer::*;
pub use drink::*;
pub use mode::*;
pub use order::*;
pub use seat::*;
pub use session::*;
