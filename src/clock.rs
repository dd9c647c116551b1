//! Millisecond timestamp sources for lock timing.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond clock
pub trait TimeSource {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Wall-clock time measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock advanced by hand, for replays and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: u64) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    /// Jump to `ms`; going backwards is ignored to stay monotonic
    pub fn set(&self, ms: u64) {
        if ms >= self.now.get() {
            self.now.set(ms);
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
