//! Countdown timers built on the interval model

pub mod simple_timer;
pub mod snapshot;

// Re-export main types
pub use simple_timer::SimpleTimer;
pub use snapshot::{TimerSnapshot, SNAPSHOT_FIELDS};
