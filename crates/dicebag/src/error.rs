//! Error types for weighted dispatch and value generation.

use thiserror::Error;

/// Errors that can occur while building entries or generating values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RandomError {
    /// A weight, entry sequence, or generator parameter was rejected.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The requested operation is not registered.
    #[error("Unknown operation: '{name}'")]
    UnknownOperation { name: String },
}

impl RandomError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unknown operation error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RandomError>;
