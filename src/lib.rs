//! Interval Timer - pausable countdown timers and interval representations
//! 
//! The library half holds the pure interval model (milliseconds, interval
//! objects, arrays and fixed-width strings) and `SimpleTimer`; the server
//! half keeps a registry of timers behind an HTTP API.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod interval;
pub mod round_robin;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::Config;
pub use error::{IntervalError, StateError};
pub use interval::{Interval, IntervalObject};
pub use state::AppState;
pub use timer::SimpleTimer;
pub use utils::signals::shutdown_signal;
