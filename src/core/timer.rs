//! Time sources and the per-state duration timer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Nominal period between scheduler ticks.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(20);

/// Monotonic time source.
///
/// `now` returns the time elapsed since some fixed, clock-specific origin.
/// Successive calls must never go backwards.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock backed [`Clock`] using [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced [`Clock`] for simulation and tests.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and hand another to the machine.
///
/// ```rust
/// use std::time::Duration;
/// use tickstate::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_millis(20));
/// assert_eq!(clock.now(), Duration::from_millis(20));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, to: Duration) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Measures how long the machine has been in its current state.
pub struct StateTimer {
    clock: Box<dyn Clock>,
    started: Duration,
}

impl StateTimer {
    /// Start timing from the clock's current reading.
    pub fn start(clock: Box<dyn Clock>) -> Self {
        let started = clock.now();
        Self { clock, started }
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.started)
    }

    pub fn reset(&mut self) {
        self.started = self.clock.now();
    }
}

impl std::fmt::Debug for StateTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTimer")
            .field("elapsed", &self.elapsed())
            .finish()
    }
}
