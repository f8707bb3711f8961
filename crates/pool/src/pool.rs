//! Pool registry: named buckets with stable identifiers
//!
//! # Design
//!
//! Two-tier locking:
//! - Registry lock: guards the cell list and the name index. Taken shared
//!   to resolve names and validate identifiers, exclusive only to append a
//!   new cell.
//! - Cell lock: one per bucket, guards value and stamp.
//!
//! Cells live behind `Arc`, so a read resolves its cell under the registry
//! lock, releases it, then locks only the cell. A concurrent append may
//! reallocate the list but never moves a cell out from under a reader.
//!
//! # Identifiers
//!
//! A bucket's identifier is its position in creation order. Buckets are
//! never removed, so identifiers stay valid for the life of the pool.

use crate::builder::DataPoolBuilder;
use crate::cell::Cell;
use crate::handle::Bucket;
use crate::read::Read;
use datapool_core::{BucketId, Clock, SystemClock, Timestamp};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Cell list plus name index, always mutated together
struct Registry<V> {
    cells: Vec<Arc<Cell<V>>>,
    index: FxHashMap<Arc<str>, BucketId>,
}

impl<V> Registry<V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Append a new empty cell. Caller has checked the name is absent.
    fn insert(&mut self, name: &str) -> (BucketId, Arc<str>) {
        let name: Arc<str> = Arc::from(name);
        let id = BucketId::new(self.cells.len());
        self.cells.push(Arc::new(Cell::new(Arc::clone(&name))));
        self.index.insert(Arc::clone(&name), id);
        (id, name)
    }
}

pub(crate) struct PoolInner<V> {
    registry: RwLock<Registry<V>>,
    clock: Arc<dyn Clock>,
}

/// A pool of named buckets
///
/// Cloning a `DataPool` is cheap and yields another reference to the same
/// buckets.
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - `bucket()`: shared registry lock on hit, exclusive only on first use
///   of a name; concurrent first uses of one name create exactly one bucket
/// - `get()`: shared lock on the target bucket only
/// - `put()`: exclusive lock on the target bucket only
///
/// # Example
///
/// ```
/// use datapool_pool::DataPool;
///
/// let pool = DataPool::new();
/// let users = pool.bucket("users");
///
/// let ts = users.put(vec!["alice", "bob"]);
/// let read = users.get(ts - 1);
/// assert!(read.is_fresh());
/// assert_eq!(read.value(), Some(&vec!["alice", "bob"]));
/// ```
pub struct DataPool<V> {
    inner: Arc<PoolInner<V>>,
}

impl<V> DataPool<V> {
    /// Create an empty pool stamped by the system clock
    pub fn new() -> Self {
        Self::with_parts(0, Arc::new(SystemClock))
    }

    /// Create a builder for pool configuration
    ///
    /// # Example
    ///
    /// ```
    /// use datapool_core::{ManualClock, Timestamp};
    /// use datapool_pool::DataPool;
    /// use std::sync::Arc;
    ///
    /// let clock = Arc::new(ManualClock::new(Timestamp::from_nanos(10)));
    /// let pool: DataPool<u32> = DataPool::builder().capacity(16).clock(clock).build();
    /// assert_eq!(pool.bucket("a").put(1), Timestamp::from_nanos(10));
    /// ```
    pub fn builder() -> DataPoolBuilder<V> {
        DataPoolBuilder::new()
    }

    pub(crate) fn with_parts(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                registry: RwLock::new(Registry::with_capacity(capacity)),
                clock,
            }),
        }
    }

    /// Resolve `name` to a bucket, creating it on first use
    ///
    /// Repeated calls with the same name return handles with the same
    /// identifier. A new bucket starts with no value and a zero stamp.
    pub fn bucket(&self, name: &str) -> Bucket<V> {
        if let Some(bucket) = self.lookup(name) {
            return bucket;
        }

        let mut registry = self.inner.registry.write();
        // Another caller may have created it between the two locks
        if let Some((key, &id)) = registry.index.get_key_value(name) {
            return Bucket::new(self.clone(), id, Arc::clone(key));
        }
        let (id, key) = registry.insert(name);
        let count = registry.cells.len();
        drop(registry);

        debug!("Created bucket '{}' as {} ({} buckets)", name, id, count);
        Bucket::new(self.clone(), id, key)
    }

    /// Resolve `name` without creating it
    pub fn lookup(&self, name: &str) -> Option<Bucket<V>> {
        let (key, id) = {
            let registry = self.inner.registry.read();
            let (key, &id) = registry.index.get_key_value(name)?;
            (Arc::clone(key), id)
        };
        Some(Bucket::new(self.clone(), id, key))
    }

    /// Write `value` to bucket `id` and return its new stamp
    ///
    /// Returns [`Timestamp::ZERO`] and stores nothing if `id` is not a
    /// bucket of this pool.
    pub fn put(&self, id: BucketId, value: V) -> Timestamp {
        let Some(cell) = self.cell(id) else {
            trace!("put on unknown bucket {} ignored", id);
            return Timestamp::ZERO;
        };
        let timestamp = cell.write(value, self.inner.clock.as_ref());
        trace!("put bucket {} at {}", id, timestamp);
        timestamp
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.inner.registry.read().cells.len()
    }

    /// True if no bucket has been created yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket names in identifier order
    pub fn names(&self) -> Vec<Arc<str>> {
        self.inner
            .registry
            .read()
            .cells
            .iter()
            .map(|cell| Arc::clone(cell.name()))
            .collect()
    }

    /// Name of bucket `id`
    pub fn name_of(&self, id: BucketId) -> Option<Arc<str>> {
        self.cell(id).map(|cell| Arc::clone(cell.name()))
    }

    /// Last-write stamp of bucket `id`, without copying its value
    ///
    /// Zero for a never-written bucket or an unknown `id`.
    pub fn timestamp(&self, id: BucketId) -> Timestamp {
        self.cell(id)
            .map(|cell| cell.timestamp())
            .unwrap_or(Timestamp::ZERO)
    }

    /// The pool's time source
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.inner.clock
    }

    /// True if both values refer to the same pool
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn cell(&self, id: BucketId) -> Option<Arc<Cell<V>>> {
        self.inner.registry.read().cells.get(id.index()).cloned()
    }

    /// Snapshot of the cell list, so per-cell locks are taken after the
    /// registry lock is released
    fn cells(&self) -> Vec<Arc<Cell<V>>> {
        self.inner.registry.read().cells.clone()
    }
}

impl<V: std::fmt::Debug> DataPool<V> {
    /// Log every bucket's identifier, name, value and stamp at debug level
    pub fn dump(&self) {
        let lines = self.dump_lines();
        debug!("Dump of pool ({} buckets):", lines.len());
        for line in &lines {
            debug!("{}", line);
        }
        debug!("--- end ---");
    }

    fn dump_lines(&self) -> Vec<String> {
        self.cells()
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("[{}] '{}' = {}", i, cell.name(), cell.describe()))
            .collect()
    }
}

impl<V: Clone> DataPool<V> {
    /// Read bucket `id`, comparing its stamp against `since`
    ///
    /// The value and stamp are returned whether fresh or not. An unknown
    /// `id` reads as no value, `since` echoed back, and not fresh.
    pub fn get(&self, id: BucketId, since: Timestamp) -> Read<V> {
        match self.cell(id) {
            Some(cell) => cell.read(since),
            None => {
                trace!("get on unknown bucket {} ignored", id);
                Read::missing(since)
            }
        }
    }
}

impl<V> Clone for DataPool<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for DataPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for DataPool<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self.cells();
        let mut map = f.debug_map();
        for cell in &cells {
            map.entry(cell.name(), &format_args!("{}", cell.timestamp()));
        }
        map.finish()
    }
}
