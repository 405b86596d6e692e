//! Native function errors

use thiserror::Error;

/// Errors raised by native functions and setters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Type error (e.g., wrong receiver for a method)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Range error (e.g., time value out of range)
    #[error("RangeError: {0}")]
    RangeError(String),

    /// Internal error
    #[error("InternalError: {0}")]
    InternalError(String),
}

impl VmError {
    /// Create a type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError(message.into())
    }

    /// Create a range error
    pub fn range_error(message: impl Into<String>) -> Self {
        Self::RangeError(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

/// Result type for native calls
pub type VmResult<T> = Result<T, VmError>;
