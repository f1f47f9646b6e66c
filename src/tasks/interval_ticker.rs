//! Periodic callback with a run/shutdown lifecycle

use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::info;

use crate::round_robin::RoundRobinRange;

pub const DEFAULT_INTERVAL_MILLIS: u64 = 10;

fn next_ticker_id() -> i64 {
    static IDS: OnceLock<Mutex<RoundRobinRange>> = OnceLock::new();
    let ids = IDS.get_or_init(|| Mutex::new(RoundRobinRange::default()));
    let mut ids = ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    ids.next_id()
}

/// Calls `callback` once on `run()` and then every period until `shutdown()`.
///
/// Must be run from inside a tokio runtime.
pub struct IntervalTicker {
    id: i64,
    callback: Arc<dyn Fn() + Send + Sync>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    pub fn new<F>(callback: F, period: Option<Duration>) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: next_ticker_id(),
            callback: Arc::new(callback),
            period: period.unwrap_or(Duration::from_millis(DEFAULT_INTERVAL_MILLIS)),
            handle: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Start ticking. No-op while already running; a finished task is replaced.
    pub fn run(&mut self) {
        if self.is_running() {
            return;
        }
        self.handle = None;

        (self.callback)();

        let callback = Arc::clone(&self.callback);
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the callback already ran.
            interval.tick().await;
            loop {
                interval.tick().await;
                callback();
            }
        }));

        info!("internal timer {} initialized", self.id);
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("internal timer {} shutdown", self.id);
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
