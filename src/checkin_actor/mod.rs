//! Check-in session logic: mode-gated ordering, external order voiding and seat choice.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
