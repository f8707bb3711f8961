//! Bucket cell: one named value plus its last-write stamp
//!
//! Each cell carries its own reader/writer lock so traffic on different
//! buckets never contends. Reads take the shared side, writes the
//! exclusive side; both hold it only long enough to copy or swap the slot.

use crate::read::Read;
use datapool_core::{Clock, Timestamp};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{trace, warn};

/// Value and stamp, always updated together
#[derive(Debug)]
struct Slot<V> {
    value: Option<V>,
    timestamp: Timestamp,
}

/// A named storage cell
///
/// The name is fixed at creation. The stamp is zero until the first write
/// and strictly increases with every write after that.
#[derive(Debug)]
pub(crate) struct Cell<V> {
    name: Arc<str>,
    slot: RwLock<Slot<V>>,
}

impl<V> Cell<V> {
    /// Create an empty cell
    pub(crate) fn new(name: Arc<str>) -> Self {
        Self {
            name,
            slot: RwLock::new(Slot {
                value: None,
                timestamp: Timestamp::ZERO,
            }),
        }
    }

    pub(crate) fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Last-write stamp
    pub(crate) fn timestamp(&self) -> Timestamp {
        self.slot.read().timestamp
    }

    /// Overwrite the value and stamp it
    ///
    /// The clock is read under the write lock, so the last writer to take
    /// the lock also holds the highest stamp. If the clock has not moved
    /// past the previous stamp, the stamp is bumped by one nanosecond
    /// instead.
    pub(crate) fn write(&self, value: V, clock: &dyn Clock) -> Timestamp {
        let mut slot = self.slot.write();
        let now = clock.now();
        let timestamp = if now > slot.timestamp {
            now
        } else {
            if now < slot.timestamp {
                warn!(
                    "Clock behind last write on bucket '{}' ({} < {}), advancing stamp",
                    self.name, now, slot.timestamp
                );
            } else {
                trace!("Clock stalled on bucket '{}' at {}", self.name, now);
            }
            slot.timestamp.next()
        };
        let previous = std::mem::replace(&mut slot.value, Some(value));
        slot.timestamp = timestamp;
        drop(slot);

        // Old value is dropped outside the lock
        drop(previous);
        timestamp
    }
}

impl<V: std::fmt::Debug> Cell<V> {
    /// Render value and stamp from one consistent snapshot
    pub(crate) fn describe(&self) -> String {
        let slot = self.slot.read();
        match &slot.value {
            Some(value) => format!("{:?} ({})", value, slot.timestamp),
            None => format!("<empty> ({})", slot.timestamp),
        }
    }
}

impl<V: Clone> Cell<V> {
    /// Copy out value and stamp, compared against `since`
    pub(crate) fn read(&self, since: Timestamp) -> Read<V> {
        let slot = self.slot.read();
        Read::observed(slot.value.clone(), slot.timestamp, since)
    }
}
