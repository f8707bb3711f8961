//! Time sources for write stamps
//!
//! Pools read the current time through the [`Clock`] trait so tests can
//! drive time by hand with [`ManualClock`]. Production pools use
//! [`SystemClock`], which reads the wall clock at nanosecond resolution.

use crate::types::Timestamp;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of write stamps
///
/// Implementations only need to be roughly monotonic. The pool guarantees
/// strictly increasing stamps per bucket on its own, even when the clock
/// stalls or steps backwards.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time
    fn now(&self) -> Timestamp;
}

/// Wall clock, nanoseconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Out of range before 1970 or after 2262; report zero and let the
        // per-bucket tie-breaker take over.
        let nanos = Utc::now()
            .timestamp_nanos_opt()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        Timestamp::from_nanos(nanos)
    }
}

/// Hand-driven clock for tests and simulations
///
/// # Example
///
/// ```
/// use datapool_core::{Clock, ManualClock, Timestamp};
///
/// let clock = ManualClock::new(Timestamp::from_nanos(1_000));
/// assert_eq!(clock.now(), Timestamp::from_nanos(1_000));
///
/// clock.advance(500);
/// assert_eq!(clock.now(), Timestamp::from_nanos(1_500));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            nanos: AtomicU64::new(start.as_nanos()),
        }
    }

    /// Jump to an absolute time, forwards or backwards
    pub fn set(&self, ts: Timestamp) {
        self.nanos.store(ts.as_nanos(), Ordering::Release);
    }

    /// Move forward by `nanos` and return the new time, saturating at
    /// `u64::MAX`
    pub fn advance(&self, nanos: u64) -> Timestamp {
        let prev = self
            .nanos
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_add(nanos))
            })
            .unwrap_or_else(|n| n);
        Timestamp::from_nanos(prev.saturating_add(nanos))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.nanos.load(Ordering::Acquire))
    }
}
