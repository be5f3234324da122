//! Live countdowns driven by a tokio interval.
//!
//! Each [`CountdownHandle`] owns at most one tick task. Cancelling,
//! retargeting and dropping the handle all disarm the task before returning;
//! once [`CountdownHandle::cancel`] returns, the callback is never invoked
//! again.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::countdown::clock::{CountdownClock, TimeSource};
use crate::countdown::remaining::CountdownState;
use crate::error::{Error, Result};
use crate::utils::constants::TICK_INTERVAL_MS;

/// Callback invoked with each new countdown state
pub type TickCallback = Box<dyn FnMut(&CountdownState) + Send + 'static>;

// ═══════════════════════════════════════════════════════════════════════════════
// MONOTONIC CLOCK
// ═══════════════════════════════════════════════════════════════════════════════

/// Wall-clock anchor advanced by the runtime's monotonic clock.
///
/// Immune to wall-clock jumps after creation, and follows tokio's paused
/// clock in tests.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    wall_anchor: DateTime<Utc>,
    anchor: Instant,
}

impl MonotonicClock {
    /// Anchor at the current wall-clock time
    pub fn new() -> Self {
        Self::anchored_at(Utc::now())
    }

    /// Anchor at a given wall-clock instant
    pub fn anchored_at(wall_anchor: DateTime<Utc>) -> Self {
        Self {
            wall_anchor,
            anchor: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.anchor.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.wall_anchor + elapsed
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HANDLE
// ═══════════════════════════════════════════════════════════════════════════════

struct Subscriber {
    on_tick: TickCallback,
    last: CountdownState,
}

struct ArmedTimer {
    task: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

/// Owner of a live countdown; dropping it stops the ticks
pub struct CountdownHandle {
    target: DateTime<Utc>,
    source: Arc<dyn TimeSource>,
    subscriber: Arc<Mutex<Subscriber>>,
    timer: Option<ArmedTimer>,
}

/// Start a live countdown against the runtime's monotonic clock.
///
/// `on_tick` runs synchronously with the initial state, then once per second
/// until the state is `Expired`. A target that has already passed yields a
/// single `Expired` call and arms nothing.
pub fn create_countdown<F>(target: DateTime<Utc>, on_tick: F) -> Result<CountdownHandle>
where
    F: FnMut(&CountdownState) + Send + 'static,
{
    create_countdown_with_clock(target, Arc::new(MonotonicClock::new()), on_tick)
}

/// Start a live countdown reading time from `source`
pub fn create_countdown_with_clock<F>(
    target: DateTime<Utc>,
    source: Arc<dyn TimeSource>,
    on_tick: F,
) -> Result<CountdownHandle>
where
    F: FnMut(&CountdownState) + Send + 'static,
{
    let mut handle = CountdownHandle {
        target,
        source,
        subscriber: Arc::new(Mutex::new(Subscriber {
            on_tick: Box::new(on_tick),
            last: CountdownState::Expired,
        })),
        timer: None,
    };
    handle.activate()?;
    Ok(handle)
}

impl CountdownHandle {
    /// Target instant
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Last state delivered to the callback
    pub fn state(&self) -> CountdownState {
        lock(&self.subscriber).last
    }

    /// True while a tick task is armed and running
    pub fn is_active(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.task.is_finished())
    }

    /// Stop ticking. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancelled.store(true, Ordering::SeqCst);
            // Wait out a delivery already in progress
            drop(lock(&self.subscriber));
            timer.task.abort();
            tracing::debug!("Countdown to {} disarmed", self.target);
        }
    }

    /// Count down to a new target; the old timer is disarmed first
    pub fn retarget(&mut self, target: DateTime<Utc>) -> Result<()> {
        self.cancel();
        self.target = target;
        self.activate()
    }

    fn activate(&mut self) -> Result<()> {
        let clock = CountdownClock::new(self.target, Arc::clone(&self.source));
        let initial = clock.state();

        let runtime = if initial.is_expired() {
            None
        } else {
            let runtime = tokio::runtime::Handle::try_current()
                .map_err(|e| Error::TimerUnavailable(e.to_string()))?;
            Some(runtime)
        };

        let cancelled = Arc::new(AtomicBool::new(false));
        deliver(&self.subscriber, &cancelled, &initial);

        let Some(runtime) = runtime else {
            tracing::debug!("Countdown to {} already expired", self.target);
            return Ok(());
        };

        let task = runtime.spawn(run_ticks(
            clock,
            Arc::clone(&self.subscriber),
            Arc::clone(&cancelled),
        ));
        self.timer = Some(ArmedTimer { task, cancelled });

        tracing::debug!("Countdown to {} armed", self.target);
        Ok(())
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for CountdownHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownHandle")
            .field("target", &self.target)
            .field("source", &self.source)
            .field("active", &self.is_active())
            .finish()
    }
}

async fn run_ticks(
    mut clock: CountdownClock,
    subscriber: Arc<Mutex<Subscriber>>,
    cancelled: Arc<AtomicBool>,
) {
    let period = Duration::from_millis(TICK_INTERVAL_MS);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let state = clock.tick();
        tracing::trace!("Countdown tick: {:?}", state);

        if !deliver(&subscriber, &cancelled, &state) {
            break;
        }
        if state.is_expired() {
            tracing::debug!("Countdown to {} expired", clock.target());
            break;
        }
    }
}

/// Hand a state to the callback unless the timer was cancelled
fn deliver(subscriber: &Mutex<Subscriber>, cancelled: &AtomicBool, state: &CountdownState) -> bool {
    let mut subscriber = lock(subscriber);
    if cancelled.load(Ordering::SeqCst) {
        return false;
    }
    subscriber.last = *state;
    (subscriber.on_tick)(state);
    true
}

fn lock(subscriber: &Mutex<Subscriber>) -> MutexGuard<'_, Subscriber> {
    subscriber.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Countdown callback panicked; continuing with last state");
        poisoned.into_inner()
    })
}
