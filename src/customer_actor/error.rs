//! Error types for the Customer actor.

use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// The requested customer was not found.
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// The customer data provided is invalid.
    #[error("Customer validation error: {0}")]
    Validation(String),

    /// The customer still has rentals on file and cannot be removed.
    #[error("Customer {id} has {rentals} rental(s) on file")]
    InUse { id: String, rentals: i64 },

    /// An underlying database error occurred.
    #[error("Customer database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<sqlx::Error> for CustomerError {
    fn from(e: sqlx::Error) -> Self {
        CustomerError::DatabaseError(e.to_string())
    }
}
