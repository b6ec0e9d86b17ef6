//! Error types for value conversions.

use thiserror::Error;

/// Errors raised by a [`TimestampConverter`](crate::TimestampConverter).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Input string was empty
    #[error("input is too short")]
    Empty,

    /// Input did not match any accepted format
    #[error("invalid datetime format '{0}'")]
    InvalidFormat(String),

    /// Input parsed but is out of range (e.g. epoch overflow)
    #[error("datetime out of range: {0}")]
    OutOfRange(String),
}

impl ConversionError {
    /// Creates a new invalid format error.
    pub fn invalid_format(input: impl Into<String>) -> Self {
        Self::InvalidFormat(input.into())
    }
}
