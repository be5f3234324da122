//! Time sources and the synchronous countdown clock.
//!
//! [`CountdownClock`] is the state machine without any timer attached; the
//! caller decides when to call [`CountdownClock::tick`]. The async handle in
//! [`timer`](super::timer) drives it once per second.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::countdown::remaining::{compute_state, CountdownState};

// ═══════════════════════════════════════════════════════════════════════════════
// TIME SOURCES
// ═══════════════════════════════════════════════════════════════════════════════

/// Supplies the current wall-clock instant
pub trait TimeSource: Send + Sync + fmt::Debug {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock shared between clones
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Jump to an instant
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move forward (or back, for negative durations)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COUNTDOWN CLOCK
// ═══════════════════════════════════════════════════════════════════════════════

/// Countdown to one target instant
#[derive(Debug, Clone)]
pub struct CountdownClock {
    target: DateTime<Utc>,
    source: Arc<dyn TimeSource>,
    state: CountdownState,
}

impl CountdownClock {
    /// Start a countdown; the initial state is computed immediately
    pub fn new(target: DateTime<Utc>, source: Arc<dyn TimeSource>) -> Self {
        let state = compute_state(target, source.now());
        Self {
            target,
            source,
            state,
        }
    }

    /// Start a countdown against the system clock
    pub fn with_system_clock(target: DateTime<Utc>) -> Self {
        Self::new(target, Arc::new(SystemClock))
    }

    /// Target instant
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Latest computed state
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// True once the target has passed
    pub fn is_expired(&self) -> bool {
        self.state.is_expired()
    }

    /// Recompute from the time source; `Expired` never changes back
    pub fn tick(&mut self) -> CountdownState {
        if !self.state.is_expired() {
            self.state = compute_state(self.target, self.source.now());
        }
        self.state
    }

    /// Count down to a new target, discarding the previous state
    pub fn retarget(&mut self, target: DateTime<Utc>) -> CountdownState {
        self.target = target;
        self.state = compute_state(target, self.source.now());
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap()
    }

    fn total_ms(state: CountdownState) -> u64 {
        state.remaining().map(|r| r.total_ms).unwrap_or(0)
    }

    #[test]
    fn test_tick_decreases_by_elapsed_time() {
        let manual = ManualClock::new(start());
        let target = start() + Duration::minutes(5);
        let mut clock = CountdownClock::new(target, Arc::new(manual.clone()));
        let first = total_ms(clock.state());

        manual.advance(Duration::seconds(1));
        let second = total_ms(clock.tick());
        assert_eq!(first - second, 1_000);
    }

    #[test]
    fn test_expired_is_terminal() {
        let manual = ManualClock::new(start());
        let target = start() + Duration::seconds(2);
        let mut clock = CountdownClock::new(target, Arc::new(manual.clone()));

        manual.advance(Duration::seconds(3));
        assert!(clock.tick().is_expired());

        // Even if the clock goes backwards the countdown stays finished
        manual.set(start());
        assert!(clock.tick().is_expired());
    }

    #[test]
    fn test_past_target_starts_expired() {
        let manual = ManualClock::new(start());
        let clock = CountdownClock::new(start() - Duration::milliseconds(1_000), Arc::new(manual));
        assert!(clock.is_expired());
    }

    #[test]
    fn test_retarget_recomputes() {
        let manual = ManualClock::new(start());
        let mut clock = CountdownClock::new(start() - Duration::hours(1), Arc::new(manual));
        assert!(clock.is_expired());

        let state = clock.retarget(start() + Duration::hours(2));
        assert_eq!(state.remaining().map(|r| r.hours), Some(2));
        assert_eq!(clock.target(), start() + Duration::hours(2));
    }

    #[test]
    fn test_system_clock_future_target() {
        let clock = CountdownClock::with_system_clock(Utc::now() + Duration::days(3));
        assert!(!clock.is_expired());
    }
}
