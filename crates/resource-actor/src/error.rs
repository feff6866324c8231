//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, as opposed to the resource errors an entity
//! returns from its hooks (those travel inside [`FrameworkError::EntityError`]).

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Store unavailable: {0}")]
    Store(#[from] sqlx::Error),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Boxes a resource error.
    pub fn entity<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        FrameworkError::EntityError(Box::new(e))
    }

    /// Recovers the resource error type carried by `EntityError`.
    ///
    /// Any other variant, or an entity error of a different type, is handed back unchanged.
    pub fn downcast_entity<E: std::error::Error + 'static>(self) -> Result<E, FrameworkError> {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}
