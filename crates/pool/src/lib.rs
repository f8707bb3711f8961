//! Bucket pool for datapool
//!
//! This crate implements the concurrent bucket cache:
//! - DataPool: registry of named buckets with stable identifiers
//! - Bucket: handle for reading and writing one bucket
//! - Read: value, last-write stamp and freshness of a read
//! - DataPoolBuilder: capacity and clock configuration
//!
//! Per-bucket reader/writer locks keep traffic on different buckets
//! independent; the registry lock is only taken exclusively to add a
//! bucket.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod cell;
mod handle;
mod pool;
mod read;

pub use builder::DataPoolBuilder;
pub use handle::Bucket;
pub use pool::DataPool;
pub use read::Read;
