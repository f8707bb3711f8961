//! Pool Comprehensive Test Suite
//!
//! Exercises the public API end to end: name resolution, reads and
//! writes through handles, freshness, sentinel behavior for unknown
//! identifiers, value fidelity and multi-threaded access.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all pool tests
//! cargo test --test pool_comprehensive
//!
//! # Run concurrency tests only
//! cargo test --test pool_comprehensive concurrency::
//! ```

pub use std::sync::Arc;

pub use datapool::prelude::*;

pub mod concurrency;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Route library logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

/// Pool stamped by the wall clock
pub fn create_pool<V>() -> DataPool<V> {
    init_tracing();
    DataPool::new()
}

/// Pool stamped by a hand-driven clock starting at `start` nanoseconds
pub fn create_manual_pool<V>(start: u64) -> (DataPool<V>, Arc<ManualClock>) {
    init_tracing();
    let clock = Arc::new(ManualClock::new(Timestamp::from_nanos(start)));
    let pool = DataPool::builder().clock(clock.clone()).build();
    (pool, clock)
}
