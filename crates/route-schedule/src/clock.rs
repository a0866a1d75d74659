//! Time sources for quantum budgeting.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock that advances by a fixed `tick` on every reading.
///
/// With a 10 ms tick and a 50 ms budget a quantum reads the clock at 0 ms
/// (start), then after each slice at 10, 20, 30, 40 and 50 ms, so it runs
/// exactly five slices.
pub struct TickingClock {
    now: Cell<Duration>,
    tick: Duration,
}

impl TickingClock {
    pub fn new(tick: Duration) -> Self {
        Self { now: Cell::new(Duration::ZERO), tick }
    }

    /// Jump ahead without counting as a reading.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for TickingClock {
    fn now(&self) -> Duration {
        let t = self.now.get();
        self.now.set(t + self.tick);
        t
    }
}
