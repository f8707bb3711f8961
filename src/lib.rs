//! # DataPool
//!
//! In-process cache of named buckets. Each bucket holds one value plus the
//! stamp of its last write; readers compare that stamp against one they
//! saw earlier to tell whether the value is fresh, without any separate
//! invalidation mechanism.
//!
//! ## Quick Start
//!
//! ```
//! use datapool::prelude::*;
//!
//! let pool = DataPool::new();
//! let prices = pool.bucket("prices");
//!
//! // Writer
//! let stamp = prices.put(vec![101, 99, 104]);
//!
//! // Reader: has anything changed since `stamp`?
//! let read = prices.get(stamp);
//! assert!(!read.is_fresh());
//! assert_eq!(read.value(), Some(&vec![101, 99, 104]));
//! ```
//!
//! ## Heterogeneous Pools
//!
//! A pool is generic over its value type. To mix types in one pool, use
//! [`AnyPool`] and read back with a checked downcast:
//!
//! ```
//! use datapool::prelude::*;
//!
//! let pool = AnyPool::new();
//! let config = pool.bucket("config");
//! config.put_any(String::from("verbose"));
//!
//! let read = config.get_as::<String>(Timestamp::ZERO).unwrap();
//! assert_eq!(read.value.as_deref().map(String::as_str), Some("verbose"));
//! assert!(config.get_as::<u32>(Timestamp::ZERO).unwrap_err().is_wrong_type());
//! ```
//!
//! ## Guarantees
//!
//! - Resolving a name always yields the same [`BucketId`]
//! - Stamps of sequential writes to one bucket strictly increase
//! - A never-written bucket has a zero stamp and is never fresh
//! - Unknown identifiers read as empty and write nothing

#![warn(missing_docs)]

pub mod prelude;

// Re-export main entry points
pub use datapool_pool::{Bucket, DataPool, DataPoolBuilder, Read};

// Re-export core types
pub use datapool_core::{
    AnyValue, BucketId, Clock, Error, ManualClock, Result, SystemClock, Timestamp,
};

/// A pool whose buckets may hold values of different types
pub type AnyPool = DataPool<AnyValue>;
