//! Result of a bucket read

use datapool_core::Timestamp;

/// What a bucket read observed
///
/// - `value`: the stored value, `None` if the bucket was never written
///   (or the identifier was out of range)
/// - `timestamp`: last-write stamp, zero if never written
/// - `fresh`: `timestamp` is strictly later than the compare stamp
///
/// For an out-of-range identifier the read echoes the caller's compare
/// stamp back as `timestamp` and is never fresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Read<V> {
    /// Stored value
    pub value: Option<V>,
    /// Last-write stamp
    pub timestamp: Timestamp,
    /// Written strictly after the compare stamp
    pub fresh: bool,
}

impl<V> Read<V> {
    /// Build a read of `value` stamped `timestamp`, compared against `since`
    pub(crate) fn observed(value: Option<V>, timestamp: Timestamp, since: Timestamp) -> Self {
        Self {
            value,
            timestamp,
            fresh: timestamp > since,
        }
    }

    /// Read of an identifier the pool does not know
    pub(crate) fn missing(since: Timestamp) -> Self {
        Self {
            value: None,
            timestamp: since,
            fresh: false,
        }
    }

    /// Written strictly after the compare stamp
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// The bucket has been written at least once
    ///
    /// Only meaningful for reads through a valid identifier.
    pub fn is_written(&self) -> bool {
        self.value.is_some()
    }

    /// Borrow the stored value
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Take the stored value
    pub fn into_value(self) -> Option<V> {
        self.value
    }

    /// Split into `(value, timestamp, fresh)`
    pub fn into_parts(self) -> (Option<V>, Timestamp, bool) {
        (self.value, self.timestamp, self.fresh)
    }

    /// Transform the value, keeping timestamp and freshness
    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Read<U> {
        Read {
            value: self.value.map(f),
            timestamp: self.timestamp,
            fresh: self.fresh,
        }
    }

    /// Fallible [`Read::map`]
    pub fn try_map<U, E, F: FnOnce(V) -> Result<U, E>>(self, f: F) -> Result<Read<U>, E> {
        Ok(Read {
            value: self.value.map(f).transpose()?,
            timestamp: self.timestamp,
            fresh: self.fresh,
        })
    }
}

impl<V> From<Read<V>> for (Option<V>, Timestamp, bool) {
    fn from(read: Read<V>) -> Self {
        read.into_parts()
    }
}
