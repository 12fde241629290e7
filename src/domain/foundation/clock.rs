//! Clock abstraction for deterministic time handling.
//!
//! Domain logic never reads the wall clock directly; handlers and services
//! receive a `Clock` so tests can pin "now" to a fixed instant.

use std::sync::RwLock;

use super::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current moment.
    fn now(&self) -> Timestamp;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock pinned to a fixed instant, adjustable mid-test.
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, now: Timestamp) {
        *self.now.write().expect("FixedClock lock poisoned") = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().expect("FixedClock lock poisoned")
    }
}
