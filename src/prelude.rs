//! Convenient imports for DataPool.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use datapool::prelude::*;
//!
//! let pool: DataPool<&str> = DataPool::new();
//! pool.bucket("key").put("value");
//! ```

// Main entry point
pub use crate::{AnyPool, Bucket, DataPool, DataPoolBuilder, Read};

// Error handling
pub use crate::{Error, Result};

// Core types
pub use crate::{AnyValue, BucketId, Timestamp};

// Time sources
pub use crate::{Clock, ManualClock, SystemClock};
