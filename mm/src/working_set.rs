//! Working-set bookkeeping.
//!
//! Counts resident frames across both levels against a capacity that is
//! configured exactly once, from the first configure request of the
//! run. Directory frames share the budget but cannot be reclaimed, so
//! the count may sit above capacity; the demand-paging controller keeps
//! leaf growth in check by evicting before each leaf ingress while over
//! budget.

use crate::error::{PagingError, PagingResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct WorkingSet {
    resident: u32,
    peak: u32,
    capacity: Option<u32>,
}

impl WorkingSet {
    pub const fn new() -> Self {
        Self {
            resident: 0,
            peak: 0,
            capacity: None,
        }
    }

    /// Fixes the physical page capacity. Only the first successful call
    /// takes effect; zero is rejected and leaves the capacity unset, so
    /// the run stays in its "never configured" state.
    pub fn set_capacity(&mut self, frames: u32) -> PagingResult {
        if frames == 0 {
            return Err(PagingError::InvalidCapacity { requested: frames });
        }
        if let Some(current) = self.capacity {
            return Err(PagingError::CapacityAlreadySet { current });
        }
        self.capacity = Some(frames);
        Ok(())
    }

    #[inline]
    pub const fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    #[inline]
    pub const fn resident(&self) -> u32 {
        self.resident
    }

    /// Largest resident count observed so far.
    #[inline]
    pub const fn peak(&self) -> u32 {
        self.peak
    }

    /// True once the resident count has outgrown the configured
    /// capacity. Never true before configuration.
    #[inline]
    pub fn over_capacity(&self) -> bool {
        self.capacity.is_some_and(|cap| self.resident > cap)
    }

    pub(crate) fn increment(&mut self) {
        self.resident += 1;
        if self.peak < self.resident {
            self.peak = self.resident;
        }
    }

    pub(crate) fn decrement(&mut self) {
        debug_assert!(self.resident > 0);
        self.resident -= 1;
    }
}
