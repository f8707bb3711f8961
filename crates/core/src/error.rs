//! Error types for the bucket cache.
//!
//! Bucket reads and writes never fail: out-of-range identifiers and empty
//! buckets are reported through sentinel values. This error type only
//! covers the opt-in checked typed downcasts.

use thiserror::Error;

/// All datapool errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Stored value has a different concrete type than requested
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Requested type
        expected: &'static str,
        /// Type actually stored
        actual: &'static str,
    },
}

/// Result type for datapool operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a wrong-type error.
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Error::WrongType { .. })
    }
}
