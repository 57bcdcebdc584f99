use thiserror::Error;
use crate::actor_framework::FrameworkError;
use crate::domain::CheckInMode;

/// Errors that can occur during check-in operations.
///
/// Every rejection leaves the session untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckInError {
    #[error("Drink ordering is not available in {0} mode")]
    OrderingNotAllowed(CheckInMode),
    #[error("Seat selection is not available in {0} mode")]
    SeatSelectionNotAllowed(CheckInMode),
    #[error("Inline ordering is not available in {0} mode")]
    InlineOrderingUnavailable(CheckInMode),
    #[error("Inline ordering panel is closed")]
    InlineOrderingClosed,
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Order item not found: {0}")]
    ItemNotFound(String),
    #[error("External order not found: {0}")]
    ExternalOrderNotFound(String),
    #[error("No external order is awaiting void confirmation")]
    NoPendingVoid,
    #[error("Seat is occupied: {0}")]
    SeatOccupied(String),
    #[error("Seat not found: {0}")]
    SeatNotFound(String),
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CheckInError>> for CheckInError {
    fn from(err: FrameworkError<CheckInError>) -> Self {
        match err {
            FrameworkError::Domain(e) => e,
            FrameworkError::NotFound(id) => CheckInError::SessionNotFound(id),
            other => CheckInError::ActorCommunicationError(other.to_string()),
        }
    }
}
