//! Expiry watch background task

use std::{sync::Arc, time::Duration};
use tracing::info;

use super::IntervalTicker;
use crate::state::AppState;

/// Build a ticker that sweeps the registry for newly expired timers.
/// The caller owns the lifecycle (`run` / `shutdown`).
pub fn expiry_watch(state: Arc<AppState>, period: Duration) -> IntervalTicker {
    info!("Expiry watch sweeping every {}ms", period.as_millis());
    IntervalTicker::new(move || state.sweep_expired_logged(), Some(period))
}
