//! Error type for fallible map lookups.

use thiserror::Error;

/// Failure returned by the checked accessors `at` and `at_mut`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// No live entry exists for the requested key.
    #[error("key not found")]
    KeyNotFound,
}

/// Result alias for map operations that can fail.
pub type Result<T> = core::result::Result<T, MapError>;
