//! Error types for loadpath.
//!
//! Only malformed input is an error. Absence of an entry is reported through
//! [`Removal::NotFound`](crate::Removal::NotFound) or `None`, and lock
//! contention is resolved inside the registry.

use thiserror::Error;

/// Main error type for the loadpath library.
#[derive(Debug, Error)]
pub enum LoadPathError {
    #[error("Invalid location {input:?}: {reason}")]
    InvalidLocation {
        input: String,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid context name: {0:?}")]
    InvalidContextName(String),
}

/// Result type alias for loadpath operations.
pub type Result<T> = std::result::Result<T, LoadPathError>;

impl LoadPathError {
    /// Create an invalid-location error without an underlying cause.
    pub fn invalid_location(input: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadPathError::InvalidLocation {
            input: input.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create an invalid-location error caused by an IO failure.
    pub fn invalid_location_io(input: impl Into<String>, err: std::io::Error) -> Self {
        LoadPathError::InvalidLocation {
            input: input.into(),
            reason: err.to_string(),
            source: Some(err),
        }
    }

    /// Convert to a process exit code (sysexits.h values).
    ///
    /// - 64 (`EX_USAGE`): context name rejected
    /// - 65 (`EX_DATAERR`): location could not be normalized
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadPathError::InvalidContextName(_) => 64,
            LoadPathError::InvalidLocation { .. } => 65,
        }
    }
}
