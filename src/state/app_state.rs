//! Main application state management

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{TimerEvent, TimerView};
use crate::{
    clock::Clock,
    error::{IntervalError, StateError},
    interval::Interval,
    round_robin::RoundRobinRange,
    timer::{SimpleTimer, TimerSnapshot},
};

/// A registered timer plus whether its expiry has been announced
#[derive(Debug, Clone)]
pub struct TimerEntry {
    pub timer: SimpleTimer,
    pub expiry_reported: bool,
}

impl TimerEntry {
    fn new(timer: SimpleTimer) -> Self {
        Self {
            timer,
            expiry_reported: false,
        }
    }
}

/// Main application state: the timer registry and server metadata
pub struct AppState {
    /// Registered timers keyed by id
    pub timers: Arc<Mutex<BTreeMap<i64, TimerEntry>>>,
    ids: Mutex<RoundRobinRange>,
    /// Clock every timer in the registry runs against
    pub clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for expiry notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
}

impl AppState {
    /// Create an empty registry
    pub fn new(port: u16, host: String, clock: Arc<dyn Clock>) -> Self {
        let (event_tx, _) = broadcast::channel(100);

        Self {
            timers: Arc::new(Mutex::new(BTreeMap::new())),
            ids: Mutex::new(RoundRobinRange::default()),
            clock,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
        }
    }

    fn lock_timers(&self) -> Result<MutexGuard<'_, BTreeMap<i64, TimerEntry>>, StateError> {
        self.timers
            .lock()
            .map_err(|e| StateError::Lock(format!("timer registry: {}", e)))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Insert a timer under a fresh id
    fn register(&self, timer: SimpleTimer, action: &str) -> Result<TimerView, StateError> {
        let mut timers = self.lock_timers()?;
        let mut ids = self
            .ids
            .lock()
            .map_err(|e| StateError::Lock(format!("id generator: {}", e)))?;

        // Skip ids still held after the counter wraps around
        let id = (0..ids.span())
            .map(|_| ids.next_id())
            .find(|id| !timers.contains_key(id))
            .ok_or(StateError::IdsExhausted)?;
        drop(ids);

        let view = TimerView::of(id, &timer);
        timers.insert(id, TimerEntry::new(timer));
        drop(timers);

        info!("Registered timer {} ('{}')", id, view.name);
        self.record_action(action);
        Ok(view)
    }

    /// Create and register a fresh timer
    pub fn create_timer(&self, interval: Interval, name: Option<&str>) -> Result<TimerView, StateError> {
        let timer = SimpleTimer::new(interval, name, Arc::clone(&self.clock))?;
        self.register(timer, "create")
    }

    /// Register a timer rebuilt from a JSON snapshot
    pub fn restore_timer(&self, snapshot: serde_json::Value) -> Result<TimerView, StateError> {
        let timer = SimpleTimer::from_value(snapshot, Arc::clone(&self.clock))?;
        self.register(timer, "restore")
    }

    /// Apply `updater` to one timer and return its new view
    pub fn update_timer<F>(&self, id: i64, action: &str, updater: F) -> Result<TimerView, StateError>
    where
        F: FnOnce(&mut SimpleTimer) -> Result<(), IntervalError>,
    {
        let mut timers = self.lock_timers()?;
        let entry = timers.get_mut(&id).ok_or(StateError::NotFound(id))?;

        updater(&mut entry.timer)?;
        if !entry.timer.is_expired() {
            entry.expiry_reported = false;
        }
        let view = TimerView::of(id, &entry.timer);
        drop(timers);

        debug!("Timer {} updated by '{}'", id, action);
        self.record_action(action);
        Ok(view)
    }

    pub fn pause_timer(&self, id: i64) -> Result<TimerView, StateError> {
        self.update_timer(id, "pause", |timer| {
            timer.pause();
            Ok(())
        })
    }

    pub fn resume_timer(&self, id: i64) -> Result<TimerView, StateError> {
        self.update_timer(id, "resume", |timer| {
            timer.resume();
            Ok(())
        })
    }

    pub fn reset_timer(&self, id: i64) -> Result<TimerView, StateError> {
        self.update_timer(id, "reset", SimpleTimer::reset)
    }

    pub fn expire_timer(&self, id: i64) -> Result<TimerView, StateError> {
        self.update_timer(id, "expire", |timer| timer.set_expired(true))
    }

    pub fn extend_timer(&self, id: i64, amount: Interval) -> Result<TimerView, StateError> {
        self.update_timer(id, "extend", |timer| timer.extend(amount))
    }

    pub fn remove_timer(&self, id: i64) -> Result<TimerView, StateError> {
        let entry = self.lock_timers()?.remove(&id).ok_or(StateError::NotFound(id))?;
        info!("Removed timer {} ('{}')", id, entry.timer.name());
        self.record_action("remove");
        Ok(TimerView::of(id, &entry.timer))
    }

    pub fn get_timer(&self, id: i64) -> Result<TimerView, StateError> {
        let timers = self.lock_timers()?;
        let entry = timers.get(&id).ok_or(StateError::NotFound(id))?;
        Ok(TimerView::of(id, &entry.timer))
    }

    pub fn list_timers(&self) -> Result<Vec<TimerView>, StateError> {
        let timers = self.lock_timers()?;
        Ok(timers
            .iter()
            .map(|(id, entry)| TimerView::of(*id, &entry.timer))
            .collect())
    }

    pub fn snapshot_timer(&self, id: i64) -> Result<TimerSnapshot, StateError> {
        let timers = self.lock_timers()?;
        let entry = timers.get(&id).ok_or(StateError::NotFound(id))?;
        Ok(entry.timer.snapshot())
    }

    /// Announce timers that expired since the last sweep. Returns how many.
    pub fn sweep_expired(&self) -> Result<usize, StateError> {
        let mut newly_expired = Vec::new();
        {
            let mut timers = self.lock_timers()?;
            for (id, entry) in timers.iter_mut() {
                let expired = entry.timer.is_expired();
                if expired && !entry.expiry_reported {
                    newly_expired.push(TimerEvent::Expired {
                        id: *id,
                        name: entry.timer.name().to_string(),
                    });
                }
                entry.expiry_reported = expired;
            }
        }

        for event in &newly_expired {
            info!("Timer expired: {:?}", event);
            // No subscribers is fine; expiry is also visible through the views
            if self.event_tx.send(event.clone()).is_err() {
                debug!("No listeners for expiry event");
            }
        }

        Ok(newly_expired.len())
    }

    /// Subscribe to expiry notifications
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Log and swallow sweep failures; used from the ticker callback
    pub fn sweep_expired_logged(&self) {
        if let Err(e) = self.sweep_expired() {
            warn!("Expiry sweep failed: {}", e);
        }
    }
}
