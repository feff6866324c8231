//! Errors raised while starting or stopping the system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}
