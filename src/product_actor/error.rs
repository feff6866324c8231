//! Error types for the Product actor.

use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Another product already uses this code.
    #[error("Product code already exists: {0}")]
    DuplicateCode(String),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    Validation(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: ProductId,
        requested: u32,
        available: u32,
    },

    /// An underlying database error occurred.
    #[error("Product database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<sqlx::Error> for ProductError {
    fn from(e: sqlx::Error) -> Self {
        ProductError::DatabaseError(e.to_string())
    }
}
