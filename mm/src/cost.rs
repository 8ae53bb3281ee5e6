//! Cycle-cost accounting.
//!
//! Two running totals: the simulated cost of every translation step,
//! swap-in, and dirty write-back, and a baseline total for the same
//! access stream on a machine without paging. Allocating a fresh frame
//! is free; only traffic to the backing store costs extra cycles.

use crate::defs::{CYCLES_MEMORY_ACCESS, CYCLES_SWAP_IN, CYCLES_WRITE_BACK};

#[derive(Debug, Default, Clone, Copy)]
pub struct CycleAccount {
    paged: u64,
    baseline: u64,
}

impl CycleAccount {
    #[inline]
    pub const fn new() -> Self {
        Self {
            paged: 0,
            baseline: 0,
        }
    }

    /// One page-structure lookup. Charged twice per access, once per
    /// level.
    #[inline]
    pub fn charge_translation_step(&mut self) {
        self.paged += CYCLES_MEMORY_ACCESS;
    }

    #[inline]
    pub fn charge_swap_in(&mut self) {
        self.paged += CYCLES_SWAP_IN;
    }

    #[inline]
    pub fn charge_write_back(&mut self) {
        self.paged += CYCLES_WRITE_BACK;
    }

    /// What the access would cost without any paging hardware.
    #[inline]
    pub fn charge_baseline(&mut self) {
        self.baseline += CYCLES_MEMORY_ACCESS;
    }

    #[inline]
    pub const fn cycles(&self) -> u64 {
        self.paged
    }

    #[inline]
    pub const fn baseline_cycles(&self) -> u64 {
        self.baseline
    }
}
