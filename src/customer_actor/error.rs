use thiserror::Error;
use crate::actor_framework::FrameworkError;

/// Errors that can occur during roster operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(String),
    #[error("Customer validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CustomerError>> for CustomerError {
    fn from(err: FrameworkError<CustomerError>) -> Self {
        match err {
            FrameworkError::Domain(e) => e,
            FrameworkError::NotFound(id) => CustomerError::NotFound(id),
            other => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}
