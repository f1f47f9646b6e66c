//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{interval::IntervalSpec, state::TimerView};

/// Body of `POST /timers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimerRequest {
    pub interval: IntervalSpec,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `POST /timers/:id/extend`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendRequest {
    pub interval: IntervalSpec,
}

/// API response structure for timer endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Response whose status reflects the timer: running, paused or expired
    pub fn for_timer(message: String, timer: TimerView) -> Self {
        let status = if timer.paused {
            "paused"
        } else if timer.expired {
            "expired"
        } else {
            "running"
        };
        Self::new(status.to_string(), message, timer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerListResponse {
    pub count: usize,
    pub timers: Vec<TimerView>,
}

/// Error body returned alongside a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Registry overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer_count: usize,
    pub running: usize,
    pub paused: usize,
    pub expired: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
