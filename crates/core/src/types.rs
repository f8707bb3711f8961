//! Core types for the bucket cache
//!
//! This module defines the fundamental types used throughout the system:
//! - [`Timestamp`]: Nanosecond write stamp used for freshness checks
//! - [`BucketId`]: Positional identifier of a bucket within its pool

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Last-write stamp of a bucket, in nanoseconds since the Unix epoch
///
/// A zero timestamp means "never written". Any real write produces a
/// positive timestamp.
///
/// Arithmetic with plain nanosecond counts saturates, so `ts - 1` on a
/// zero timestamp stays zero instead of wrapping.
///
/// # Examples
///
/// ```
/// use datapool_core::Timestamp;
///
/// let ts = Timestamp::from_nanos(100);
/// assert_eq!((ts + 1).as_nanos(), 101);
/// assert_eq!((ts - 1).as_nanos(), 99);
/// assert_eq!(Timestamp::ZERO - 1, Timestamp::ZERO);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The "never written" timestamp
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create a timestamp from nanoseconds since the Unix epoch
    pub const fn from_nanos(nanos: u64) -> Self {
        Timestamp(nanos)
    }

    /// Nanoseconds since the Unix epoch
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// True for the "never written" timestamp
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The smallest timestamp strictly after this one
    pub const fn next(&self) -> Self {
        Timestamp(self.0.saturating_add(1))
    }
}

impl Add<u64> for Timestamp {
    type Output = Timestamp;

    fn add(self, nanos: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(nanos))
    }
}

impl Sub<u64> for Timestamp {
    type Output = Timestamp;

    fn sub(self, nanos: u64) -> Timestamp {
        Timestamp(self.0.saturating_sub(nanos))
    }
}

impl From<u64> for Timestamp {
    fn from(nanos: u64) -> Self {
        Timestamp(nanos)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Positional identifier of a bucket within its pool
///
/// Identifiers are assigned in creation order starting at zero and never
/// change for the lifetime of the pool. An identifier is only meaningful
/// for the pool that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketId(usize);

impl BucketId {
    /// Wrap a raw position
    pub const fn new(index: usize) -> Self {
        BucketId(index)
    }

    /// Raw position in the pool
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for BucketId {
    fn from(index: usize) -> Self {
        BucketId(index)
    }
}

impl std::fmt::Display for BucketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
