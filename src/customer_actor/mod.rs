//! Visitor roster: profile edits and recording finished check-ins.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
