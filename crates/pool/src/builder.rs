//! Pool configuration

use crate::pool::DataPool;
use datapool_core::{Clock, SystemClock};
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for pool configuration.
///
/// # Example
///
/// ```
/// use datapool_core::{ManualClock, Timestamp};
/// use datapool_pool::DataPool;
/// use std::sync::Arc;
///
/// // Production: wall clock, sized for the expected bucket count
/// let pool: DataPool<String> = DataPool::builder().capacity(64).build();
///
/// // Tests: time advances only when told to
/// let clock = Arc::new(ManualClock::new(Timestamp::from_nanos(1)));
/// let pool: DataPool<String> = DataPool::builder().clock(clock).build();
/// ```
pub struct DataPoolBuilder<V> {
    capacity: usize,
    clock: Arc<dyn Clock>,
    _value: PhantomData<fn() -> V>,
}

impl<V> DataPoolBuilder<V> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            clock: Arc::new(SystemClock),
            _value: PhantomData,
        }
    }

    /// Pre-size the registry for `capacity` buckets.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Stamp writes with `clock` instead of the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the pool.
    pub fn build(self) -> DataPool<V> {
        DataPool::with_parts(self.capacity, self.clock)
    }
}

impl<V> Default for DataPoolBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for DataPoolBuilder<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataPoolBuilder")
            .field("capacity", &self.capacity)
            .field("clock", &self.clock)
            .finish()
    }
}
