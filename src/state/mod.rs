//! State management module
//! 
//! This module contains the shared timer registry and its client-facing views.

pub mod app_state;
pub mod timer_view;

// Re-export main types
pub use app_state::{AppState, TimerEntry};
pub use timer_view::{TimerEvent, TimerView};
