//! Pausable countdown timer

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::snapshot::TimerSnapshot;
use crate::{
    clock::Clock,
    error::{IntervalError, Result},
    interval::{interval_to_string, to_milliseconds, Interval},
};

/// A countdown that answers "how much time is left?" on demand.
///
/// The timer never fires anything. `end_time` is an absolute instant on the
/// timer's clock; pausing records when the pause began, and resuming pushes
/// `end_time` back by the time spent paused.
#[derive(Clone)]
pub struct SimpleTimer {
    length: i64,
    end_time: i64,
    pause_start_time: Option<i64>,
    name: String,
    clock: Arc<dyn Clock>,
}

impl SimpleTimer {
    /// Start a fresh timer running for `interval`
    pub fn new(interval: impl Into<Interval>, name: Option<&str>, clock: Arc<dyn Clock>) -> Result<Self> {
        let length = to_milliseconds(interval)?;
        if length <= 0 {
            return Err(IntervalError::InvalidConstruction(length));
        }

        let now = clock.now_millis();
        let mut timer = Self {
            length,
            end_time: now,
            pause_start_time: None,
            name: String::new(),
            clock,
        };
        timer.set_name(name);

        info!("Creating a timer running for {}ms", timer.length);
        info!("Name: {}", timer.name);

        timer.reset()?;
        Ok(timer)
    }

    /// Start a fresh timer from an interval string such as `0000:0:00:05:00.000`
    pub fn from_string(s: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::new(Interval::parse(s)?, None, clock)
    }

    /// Rehydrate from `to_json` output
    pub fn from_json(json: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value, clock)
    }

    pub fn from_value(value: serde_json::Value, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self::from_snapshot(TimerSnapshot::from_value(value)?, clock))
    }

    pub fn from_snapshot(snapshot: TimerSnapshot, clock: Arc<dyn Clock>) -> Self {
        Self {
            length: snapshot.length,
            end_time: snapshot.end_time,
            pause_start_time: snapshot.pause_start_time,
            name: snapshot.name,
            clock,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            length: self.length,
            end_time: self.end_time,
            pause_start_time: self.pause_start_time,
            name: self.name.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Restart the countdown at full length, unpaused
    pub fn reset(&mut self) -> Result<()> {
        self.force_expire();
        self.extend(self.length)
    }

    /// Push the deadline back. A zero-length amount does nothing.
    pub fn extend(&mut self, amount: impl Into<Interval>) -> Result<()> {
        let millis = to_milliseconds(amount)?;
        if millis == 0 {
            return Ok(());
        }
        self.end_time = self.end_time.checked_add(millis).ok_or_else(|| {
            IntervalError::InvalidShape(format!("extending by {}ms overflows the deadline", millis))
        })?;
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.pause_start_time.is_some()
    }

    /// Freeze the remaining time. No-op when already paused.
    pub fn pause(&mut self) {
        if self.is_paused() {
            return;
        }
        self.pause_start_time = Some(self.clock.now_millis());
        debug!("Timer '{}' paused", self.name);
    }

    /// Continue counting down. Time spent paused is added to the deadline.
    pub fn resume(&mut self) {
        let Some(started) = self.pause_start_time.take() else {
            return;
        };
        let paused_for = self.clock.now_millis().saturating_sub(started);
        self.end_time = self.end_time.saturating_add(paused_for);
        debug!("Timer '{}' resumed after {}ms paused", self.name, paused_for);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// How long the current pause has lasted
    pub fn elapsed_pause_time(&self) -> Result<i64> {
        match self.pause_start_time {
            Some(started) => Ok(self.clock.now_millis().saturating_sub(started)),
            None => Err(IntervalError::NotPaused),
        }
    }

    fn elapsed_pause_at(&self, now: i64) -> i64 {
        self.pause_start_time
            .map_or(0, |started| now.saturating_sub(started))
    }

    /// Current instant on the timer's clock
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Remaining time in milliseconds; negative once past the deadline
    pub fn time_remaining(&self) -> i64 {
        self.time_remaining_at(self.clock.now_millis())
    }

    /// Remaining time as of `now`
    pub fn time_remaining_at(&self, now: i64) -> i64 {
        self.end_time
            .saturating_add(self.elapsed_pause_at(now))
            .saturating_sub(now)
    }

    pub fn time_remaining_non_negative(&self) -> i64 {
        self.time_remaining_non_negative_at(self.clock.now_millis())
    }

    pub fn time_remaining_non_negative_at(&self, now: i64) -> i64 {
        self.time_remaining_at(now).max(0)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(self.clock.now_millis())
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        !self.is_paused() && self.time_remaining_at(now) <= 0
    }

    /// Remaining time as of `now`, as an interval string
    pub fn format_remaining_at(&self, now: i64) -> String {
        let remaining = self.time_remaining_non_negative_at(now);
        interval_to_string(remaining).unwrap_or_else(|_| format!("{}ms", remaining))
    }

    /// Unpause and expire immediately
    pub fn force_expire(&mut self) {
        self.resume();
        self.end_time = self.clock.now_millis();
        debug!("Timer '{}' expired", self.name);
    }

    /// Only `true` is meaningful; to bring an expired timer back, `extend` it.
    pub fn set_expired(&mut self, expired: bool) -> Result<()> {
        if !expired {
            return Err(IntervalError::InvalidState(
                "a timer cannot be un-expired; extend it instead".to_string(),
            ));
        }
        self.force_expire();
        Ok(())
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the timer; `None` or an empty name restores the default
    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.default_name(),
        };
    }

    fn default_name(&self) -> String {
        format!("{}ms timer", self.length)
    }
}

impl fmt::Display for SimpleTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_remaining_at(self.clock.now_millis()))
    }
}

impl fmt::Debug for SimpleTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleTimer")
            .field("length", &self.length)
            .field("end_time", &self.end_time)
            .field("pause_start_time", &self.pause_start_time)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::interval::{Field, IntervalObject};

    fn setup(start: i64) -> (Arc<ManualClock>, Arc<dyn Clock>) {
        let clock = Arc::new(ManualClock::new(start));
        let shared: Arc<dyn Clock> = clock.clone();
        (clock, shared)
    }

    fn seconds(n: i64) -> IntervalObject {
        IntervalObject::default().with(Field::Seconds, n)
    }

    #[test]
    fn counts_down_from_full_length() {
        let (clock, shared) = setup(1_000);
        let timer = SimpleTimer::new(seconds(5), None, shared).unwrap();

        assert_eq!(timer.length(), 5_000);
        assert_eq!(timer.time_remaining(), 5_000);
        assert!(!timer.is_expired());

        clock.advance(1_200);
        assert_eq!(timer.time_remaining_non_negative(), 3_800);

        clock.advance(3_799);
        assert!(!timer.is_expired());

        clock.advance(1);
        assert!(timer.is_expired());

        clock.advance(250);
        assert_eq!(timer.time_remaining(), -250);
        assert_eq!(timer.time_remaining_non_negative(), 0);
    }

    #[test]
    fn default_and_custom_names() {
        let (_, shared) = setup(0);
        let mut timer = SimpleTimer::new(1_500i64, None, shared.clone()).unwrap();
        assert_eq!(timer.name(), "1500ms timer");

        timer.set_name(Some("eggs"));
        assert_eq!(timer.name(), "eggs");
        timer.set_name(Some(""));
        assert_eq!(timer.name(), "1500ms timer");

        let named = SimpleTimer::new(seconds(1), Some("tea"), shared).unwrap();
        assert_eq!(named.name(), "tea");
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let (_, shared) = setup(0);
        assert!(matches!(
            SimpleTimer::new(0i64, None, shared.clone()),
            Err(IntervalError::InvalidConstruction(0))
        ));
        assert!(matches!(
            SimpleTimer::new(-10i64, None, shared.clone()),
            Err(IntervalError::InvalidConstruction(-10))
        ));
        assert!(matches!(
            SimpleTimer::new(Interval::Object(IntervalObject::default()), None, shared),
            Err(IntervalError::InvalidShape(_))
        ));
    }

    #[test]
    fn pausing_does_not_consume_time() {
        let (clock, shared) = setup(0);
        let mut timer = SimpleTimer::new(seconds(10), None, shared).unwrap();

        clock.advance(3_000);
        let before = timer.time_remaining();
        timer.pause();
        assert!(timer.is_paused());

        clock.advance(60_000);
        assert_eq!(timer.elapsed_pause_time().unwrap(), 60_000);
        assert_eq!(timer.time_remaining(), before);
        assert!(!timer.is_expired());

        timer.resume();
        assert!(!timer.is_paused());
        assert_eq!(timer.time_remaining(), before);
    }

    #[test]
    fn pausing_twice_keeps_the_first_start() {
        let (clock, shared) = setup(0);
        let mut timer = SimpleTimer::new(seconds(10), None, shared).unwrap();

        timer.set_paused(true);
        clock.advance(500);
        timer.set_paused(true);
        assert_eq!(timer.elapsed_pause_time().unwrap(), 500);

        timer.set_paused(false);
        timer.set_paused(false);
        assert_eq!(timer.time_remaining(), 10_000);
    }

    #[test]
    fn paused_timer_is_never_expired() {
        let (clock, shared) = setup(0);
        let mut timer = SimpleTimer::new(1_000i64, None, shared).unwrap();
        clock.advance(2_000);
        assert!(timer.is_expired());

        timer.pause();
        assert!(!timer.is_expired());
        timer.resume();
        assert!(timer.is_expired());
    }

    #[test]
    fn elapsed_pause_time_requires_a_pause() {
        let (_, shared) = setup(0);
        let timer = SimpleTimer::new(1_000i64, None, shared).unwrap();
        assert!(matches!(timer.elapsed_pause_time(), Err(IntervalError::NotPaused)));
    }

    #[test]
    fn extend_by_zero_is_a_no_op() {
        let (_, shared) = setup(0);
        let mut timer = SimpleTimer::new(1_000i64, None, shared).unwrap();
        let end = timer.end_time();

        timer.extend(0i64).unwrap();
        assert_eq!(timer.end_time(), end);
        timer.extend(seconds(0)).unwrap();
        assert_eq!(timer.end_time(), end);

        timer.extend(seconds(2)).unwrap();
        assert_eq!(timer.end_time(), end + 2_000);
    }

    #[test]
    fn extending_while_paused_moves_the_deadline() {
        let (clock, shared) = setup(0);
        let mut timer = SimpleTimer::new(1_000i64, None, shared).unwrap();
        timer.pause();
        timer.extend(500i64).unwrap();
        clock.advance(10_000);
        timer.resume();
        assert_eq!(timer.time_remaining(), 1_500);
    }

    #[test]
    fn force_expire_unpauses_and_extend_revives() {
        let (clock, shared) = setup(0);
        let mut timer = SimpleTimer::new(seconds(30), None, shared).unwrap();
        timer.pause();
        clock.advance(100);

        timer.force_expire();
        assert!(!timer.is_paused());
        assert!(timer.is_expired());
        assert_eq!(timer.time_remaining(), 0);

        assert!(matches!(timer.set_expired(false), Err(IntervalError::InvalidState(_))));
        assert!(timer.is_expired());

        timer.extend(seconds(1)).unwrap();
        assert!(!timer.is_expired());
    }

    #[test]
    fn reset_restores_full_length() {
        let (clock, shared) = setup(0);
        let mut timer = SimpleTimer::new(seconds(4), None, shared).unwrap();
        clock.advance(3_000);
        timer.pause();
        clock.advance(1_000);

        timer.reset().unwrap();
        assert!(!timer.is_paused());
        assert_eq!(timer.time_remaining(), 4_000);
    }

    #[test]
    fn displays_remaining_time_as_interval_string() {
        let (clock, shared) = setup(0);
        let timer = SimpleTimer::from_string("0000:0:01:00:00.000", shared).unwrap();
        assert_eq!(timer.length(), 3_600_000);
        assert_eq!(timer.to_string(), "0000:0:01:00:00.000");

        clock.advance(61_001);
        assert_eq!(timer.to_string(), "0000:0:00:58:58.999");

        clock.advance(10_000_000);
        assert_eq!(timer.to_string(), "0000:0:00:00:00.000");
    }

    #[test]
    fn from_string_rejects_malformed_input() {
        let (_, shared) = setup(0);
        assert!(matches!(
            SimpleTimer::from_string("1:00", shared.clone()),
            Err(IntervalError::InvalidShape(_))
        ));
        assert!(matches!(
            SimpleTimer::from_string("0000:0:00:00:00.000", shared),
            Err(IntervalError::InvalidConstruction(0))
        ));
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let (clock, shared) = setup(50);
        let mut timer = SimpleTimer::new(seconds(20), Some("laundry"), shared.clone()).unwrap();
        clock.advance(2_000);
        timer.pause();
        clock.advance(700);

        let json = timer.to_json().unwrap();
        let restored = SimpleTimer::from_json(&json, shared).unwrap();

        assert_eq!(restored.name(), "laundry");
        assert_eq!(restored.length(), timer.length());
        assert!(restored.is_paused());
        assert_eq!(restored.time_remaining(), timer.time_remaining());
        assert_eq!(restored.snapshot(), timer.snapshot());
    }

    #[test]
    fn from_json_rejects_foreign_snapshots() {
        let (_, shared) = setup(0);
        assert!(matches!(
            SimpleTimer::from_json(r#"{"length": 10, "name": "x"}"#, shared.clone()),
            Err(IntervalError::CorruptSnapshot(_))
        ));
        assert!(matches!(
            SimpleTimer::from_json("not json", shared),
            Err(IntervalError::Json(_))
        ));
    }
}
