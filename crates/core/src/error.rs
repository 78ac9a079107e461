//! Error types for the Insight query engine.

use alloc::string::String;
use core::fmt;

/// Result type alias for Insight operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for query and dataset operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The query is structurally invalid or references fields it cannot use.
    Validation {
        message: String,
    },
    /// The query is valid but its result exceeds the cardinality cap.
    ResultTooLarge {
        limit: usize,
        actual: usize,
    },
    /// Dataset not loaded.
    NotFound {
        id: String,
    },
    /// Dataset rejected on registration.
    InvalidDataset {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation { message } => {
                write!(f, "Invalid query: {}", message)
            }
            Error::ResultTooLarge { limit, actual } => {
                write!(
                    f,
                    "The result is too big ({} rows). Only queries with a maximum of {} results are supported",
                    actual, limit
                )
            }
            Error::NotFound { id } => {
                write!(f, "Dataset not found: {}", id)
            }
            Error::InvalidDataset { message } => {
                write!(f, "Invalid dataset: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Creates a result-too-large error.
    pub fn result_too_large(limit: usize, actual: usize) -> Self {
        Error::ResultTooLarge { limit, actual }
    }

    /// Creates a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Creates an invalid dataset error.
    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Error::InvalidDataset {
            message: message.into(),
        }
    }

    /// Returns true for structural query failures.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns true when the cardinality cap was exceeded.
    #[inline]
    pub fn is_result_too_large(&self) -> bool {
        matches!(self, Error::ResultTooLarge { .. })
    }
}
