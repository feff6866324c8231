//! Error types for the Rental actor.

use crate::pricing::PriceOverflow;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur while booking or reading rentals.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RentalError {
    /// The booking data provided is invalid.
    #[error("Rental validation error: {0}")]
    Validation(String),

    /// No product of the requested type has stock and is available.
    #[error("No available product of type '{0}'")]
    NoAvailableProduct(String),

    /// Every generated receipt reference was already taken.
    #[error("Could not allocate a unique receipt reference after {0} attempts")]
    DuplicateReceipt(u32),

    /// The requested rental was not found.
    #[error("Rental not found: {0}")]
    NotFound(String),

    /// Rentals are append-only.
    #[error("Rental {0} cannot be changed once booked")]
    Immutable(String),

    /// The catalog refused a lookup or reservation.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// An underlying database error occurred.
    #[error("Rental database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<sqlx::Error> for RentalError {
    fn from(e: sqlx::Error) -> Self {
        RentalError::DatabaseError(e.to_string())
    }
}

impl From<PriceOverflow> for RentalError {
    fn from(e: PriceOverflow) -> Self {
        RentalError::Validation(e.to_string())
    }
}
