//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Theme cannot be empty")]
    EmptyTheme,

    #[error("Model id cannot be empty for {0}")]
    EmptyModel(String),

    #[error("Unknown interaction mode: {0}")]
    UnknownInteractionMode(String),

    #[error("Invalid run configuration: {0}")]
    InvalidConfiguration(String),
}
