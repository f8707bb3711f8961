//! Core types for datapool
//!
//! This crate defines the foundational types shared by the pool crate:
//! - Timestamp: nanosecond write stamps and freshness comparison
//! - BucketId: stable positional identifiers
//! - Clock: pluggable time source (system or manual)
//! - AnyValue: type-erased values for heterogeneous pools
//! - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod types;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use types::{BucketId, Timestamp};
pub use value::AnyValue;
