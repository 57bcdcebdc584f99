use thiserror::Error;

/// Errors surfaced by the seat registry service.
///
/// Unknown seat ids are not errors; occupy/release ignore them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SeatError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
