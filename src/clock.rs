//! Millisecond clock used by timers

use std::sync::{
    atomic::{AtomicI64, Ordering},
    OnceLock,
};
use std::time::Instant;

/// Source of the current instant, in milliseconds since an arbitrary epoch.
/// Implementations must never go backwards.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Process-local monotonic clock anchored at first use
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now_millis(&self) -> i64 {
        static START: OnceLock<Instant> = OnceLock::new();
        let start = START.get_or_init(Instant::now);
        i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Clock that only moves when told to (tests, replays)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Move the clock forward; negative steps are ignored
    pub fn advance(&self, millis: i64) {
        if millis > 0 {
            self.now.fetch_add(millis, Ordering::SeqCst);
        }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
