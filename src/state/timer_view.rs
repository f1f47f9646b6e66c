//! Serializable view of a registered timer

use serde::{Deserialize, Serialize};

use crate::timer::SimpleTimer;

/// What clients see of a timer at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub id: i64,
    pub name: String,
    pub length_ms: i64,
    pub remaining_ms: i64,
    /// Remaining time as an interval string
    pub remaining: String,
    pub paused: bool,
    pub expired: bool,
}

impl TimerView {
    /// Every field is computed against a single clock reading
    pub fn of(id: i64, timer: &SimpleTimer) -> Self {
        let now = timer.now_millis();
        Self {
            id,
            name: timer.name().to_string(),
            length_ms: timer.length(),
            remaining_ms: timer.time_remaining_non_negative_at(now),
            remaining: timer.format_remaining_at(now),
            paused: timer.is_paused(),
            expired: timer.is_expired_at(now),
        }
    }
}

/// Notifications published by the expiry watch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Expired { id: i64, name: String },
}
