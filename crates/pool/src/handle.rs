//! Bucket handles
//!
//! A [`Bucket`] is a capability for one bucket in one pool: the pool plus
//! the bucket's identifier. It holds no value state of its own and every
//! call forwards to the pool. Handles to the same bucket, however they
//! were obtained, are interchangeable.

use crate::pool::DataPool;
use crate::read::Read;
use datapool_core::{AnyValue, BucketId, Result, Timestamp};
use std::any::Any;
use std::sync::Arc;

/// Handle to a single bucket
///
/// # Example
///
/// ```
/// use datapool_core::Timestamp;
/// use datapool_pool::DataPool;
///
/// let pool = DataPool::new();
/// let h = pool.bucket("x");
///
/// let ts1 = h.put(10);
/// assert_eq!(h.get(ts1 + 1).into_parts(), (Some(10), ts1, false));
/// assert_eq!(h.get(ts1 - 1).into_parts(), (Some(10), ts1, true));
/// ```
pub struct Bucket<V> {
    pool: DataPool<V>,
    id: BucketId,
    name: Arc<str>,
}

impl<V> Bucket<V> {
    pub(crate) fn new(pool: DataPool<V>, id: BucketId, name: Arc<str>) -> Self {
        Self { pool, id, name }
    }

    /// Identifier within the owning pool
    pub fn id(&self) -> BucketId {
        self.id
    }

    /// Owning pool
    pub fn pool(&self) -> &DataPool<V> {
        &self.pool
    }

    /// Bucket name
    pub fn name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Last-write stamp, zero if never written
    pub fn timestamp(&self) -> Timestamp {
        self.pool.timestamp(self.id)
    }

    /// Overwrite the value and return its new stamp
    pub fn put(&self, value: V) -> Timestamp {
        self.pool.put(self.id, value)
    }
}

impl<V: Clone> Bucket<V> {
    /// Read the value, comparing its stamp against `since`
    ///
    /// Pass the stamp from an earlier read or write to ask "has this
    /// changed since then?". Pass [`Timestamp::ZERO`] to ask "has this
    /// ever been written?".
    pub fn get(&self, since: Timestamp) -> Read<V> {
        self.pool.get(self.id, since)
    }
}

impl Bucket<AnyValue> {
    /// Wrap and store a concrete value
    pub fn put_any<T: Any + Send + Sync>(&self, value: T) -> Timestamp {
        self.put(AnyValue::new(value))
    }

    /// Read the value as a `T`
    ///
    /// A never-written bucket reads as no value, not as an error.
    ///
    /// # Errors
    ///
    /// [`datapool_core::Error::WrongType`] if the stored value is not a `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, since: Timestamp) -> Result<Read<Arc<T>>> {
        self.get(since).try_map(|value| value.downcast::<T>())
    }
}

impl<V> Clone for Bucket<V> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            id: self.id,
            name: Arc::clone(&self.name),
        }
    }
}

impl<V> PartialEq for Bucket<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.pool.ptr_eq(&other.pool)
    }
}

impl<V> Eq for Bucket<V> {}

impl<V> std::fmt::Debug for Bucket<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
