//! Monotonic access clock.
//!
//! Advances once per serviced read or write; the value is stamped into
//! entries on every touch that makes or keeps them resident, giving the
//! eviction sweep its recency metric.

#[derive(Debug, Default, Clone, Copy)]
pub struct AccessClock {
    ticks: u64,
}

impl AccessClock {
    #[inline]
    pub const fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Advances the clock and returns the new value. The first access
    /// of a run observes 1, never 0, so a zero stamp always means
    /// "never touched".
    #[inline]
    pub fn tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    /// Number of accesses serviced so far.
    #[inline]
    pub const fn current(&self) -> u64 {
        self.ticks
    }
}
