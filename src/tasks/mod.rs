//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod expiry_watch;
pub mod interval_ticker;

// Re-export main types
pub use expiry_watch::expiry_watch;
pub use interval_ticker::{IntervalTicker, DEFAULT_INTERVAL_MILLIS};
