//! Time source for repository timestamps
//!
//! The repository never calls `Utc::now()` directly; it asks an injected
//! [`Clock`] so tests can pin and advance time.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Wall-clock abstraction
pub trait Clock: Send + Sync {
    /// Current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays
///
/// Time only moves when [`ManualClock::advance`] or [`ManualClock::set`] is
/// called.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        if let Ok(mut current) = self.current.lock() {
            *current += by;
        }
    }

    /// Jump to an absolute time (may move backwards)
    pub fn set(&self, to: DateTime<Utc>) {
        if let Ok(mut current) = self.current.lock() {
            *current = to;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
