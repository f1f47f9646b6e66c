//! Error types for interval conversion and timer operations

use thiserror::Error;

/// Errors raised by the interval model and `SimpleTimer`
#[derive(Debug, Error)]
pub enum IntervalError {
    /// Input is not a usable number, interval object, array or string
    #[error("invalid interval: {0}")]
    InvalidShape(String),

    /// Timer length resolved to zero or less
    #[error("interval must be positive, got {0}ms")]
    InvalidConstruction(i64),

    /// Pause duration queried while the timer is running
    #[error("cannot query elapsed pause time while unpaused")]
    NotPaused,

    #[error("invalid state transition: {0}")]
    InvalidState(String),

    /// Snapshot keys do not match the timer's own fields
    #[error("invalid JSON format: {0}")]
    CorruptSnapshot(String),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using IntervalError
pub type Result<T> = std::result::Result<T, IntervalError>;

/// Errors raised by the shared timer registry
#[derive(Debug, Error)]
pub enum StateError {
    #[error("no timer with id {0}")]
    NotFound(i64),

    #[error(transparent)]
    Timer(#[from] IntervalError),

    #[error("failed to lock {0}")]
    Lock(String),

    #[error("every timer id is in use")]
    IdsExhausted,
}
