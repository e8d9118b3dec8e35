//! Error types for emustore
//!
//! Missing keys are never errors: they are reported as `None`. The variants
//! here cover the few ways an operation can fail without touching any I/O.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for emustore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for emustore
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An optimistic update kept losing the compare-and-swap race
    #[error("Update of key '{key}' did not commit after {attempts} attempts")]
    UpdateConflict {
        /// Key being updated
        key: String,
        /// Number of attempts made
        attempts: usize,
    },

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error came from update contention
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::UpdateConflict { .. })
    }
}
