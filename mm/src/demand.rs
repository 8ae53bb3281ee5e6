//! Demand-paging controller.
//!
//! Applies the parsed request stream to the paging store: resolves the
//! directory and leaf entries of each access, allocating or swapping
//! frames in on demand, evicting under capacity pressure, and keeping
//! the books (clock, cycle accounts, fault and eviction counters) as
//! it goes. Structural changes are reported to the attached observer
//! before and after they land.

use log::{debug, warn};

use crate::addr::{PageIndices, VirtAddr};
use crate::clock::AccessClock;
use crate::cost::CycleAccount;
use crate::error::{PagingError, PagingResult};
use crate::evict;
use crate::observe::{ActivityObserver, EntryLocation, EventPhase, NullObserver, PagingEvent};
use crate::paging::{EntryState, PagingStore};
use crate::request::{AccessKind, Request};
use crate::stats::PagingStats;

/// How an entry got resolved during a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Already resident; nothing moved.
    Resident,
    /// Fresh frame handed out on first touch.
    Allocated,
    /// Previously evicted frame brought back in.
    SwappedIn,
}

/// What a single translated access did at each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub indices: PageIndices,
    pub directory: ResolveOutcome,
    pub leaf: ResolveOutcome,
}

/// The demand pager. Owns the paging structure and every counter of
/// the run; the observer type is fixed at construction.
pub struct DemandPager<O = NullObserver> {
    store: PagingStore,
    clock: AccessClock,
    costs: CycleAccount,
    requests: u64,
    faults: u64,
    evictions: u64,
    observer: O,
}

impl DemandPager<NullObserver> {
    pub fn new() -> Self {
        Self::with_observer(NullObserver)
    }
}

impl Default for DemandPager<NullObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ActivityObserver> DemandPager<O> {
    pub fn with_observer(observer: O) -> Self {
        Self {
            store: PagingStore::new(),
            clock: AccessClock::new(),
            costs: CycleAccount::new(),
            requests: 0,
            faults: 0,
            evictions: 0,
            observer,
        }
    }

    /// Read-only view of the paging structure, for dump sinks.
    #[inline]
    pub fn store(&self) -> &PagingStore {
        &self.store
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Snapshot of the run counters.
    pub fn stats(&self) -> PagingStats {
        PagingStats {
            accesses: self.clock.current(),
            requests: self.requests,
            page_faults: self.faults,
            evictions: self.evictions,
            frames_allocated: self.store.arena().allocated(),
            table_frames: self.store.arena().table_frames(),
            leaf_frames: self.store.arena().leaf_frames(),
            cycles: self.costs.cycles(),
            baseline_cycles: self.costs.baseline_cycles(),
            working_set: self.store.working_set().resident(),
            working_set_peak: self.store.working_set().peak(),
            capacity: self.store.working_set().capacity(),
        }
    }

    /// Applies one request. Capacity mistakes (a repeat, or a bound of
    /// zero) are reported and ignored; access-time failures are fatal
    /// and propagate to the caller.
    pub fn apply(&mut self, request: Request) -> PagingResult<Option<Translation>> {
        self.requests += 1;
        match request {
            Request::Configure { capacity } => {
                match self.store.set_capacity(capacity) {
                    Ok(()) => debug!("working set capped at {capacity} frames"),
                    Err(
                        err @ (PagingError::CapacityAlreadySet { .. }
                        | PagingError::InvalidCapacity { .. }),
                    ) => warn!("{err}"),
                    Err(err) => return Err(err),
                }
                Ok(None)
            }
            Request::Access { kind, addr, .. } => self.translate(kind, addr).map(Some),
        }
    }

    /// Translates one access, faulting frames in as needed. Nothing is
    /// touched until the capacity and alignment checks both pass.
    fn translate(&mut self, kind: AccessKind, addr: VirtAddr) -> PagingResult<Translation> {
        if self.store.working_set().capacity().is_none() {
            return Err(PagingError::CapacityUnset);
        }
        let indices = addr.decompose()?;

        let stamp = self.clock.tick();
        self.costs.charge_baseline();

        let directory = self.resolve_directory(indices.directory, stamp)?;
        self.costs.charge_translation_step();

        let leaf = self.resolve_leaf(indices.directory, indices.table, stamp)?;
        self.costs.charge_translation_step();

        self.store.stamp_leaf(indices.directory, indices.table, stamp)?;
        if kind == AccessKind::Write {
            self.store.mark_leaf_dirty(indices.directory, indices.table)?;
        }

        Ok(Translation {
            indices,
            directory,
            leaf,
        })
    }

    /// Makes the directory entry resident. Table frames are handed out
    /// without an eviction check; bringing one back from swap plays by
    /// the same make-room rule as a leaf ingress.
    fn resolve_directory(
        &mut self,
        directory_index: usize,
        stamp: u64,
    ) -> PagingResult<ResolveOutcome> {
        match self.store.directory_entry(directory_index).state() {
            EntryState::Resident(_) => Ok(ResolveOutcome::Resident),
            EntryState::Unallocated => {
                let event = PagingEvent::Allocation {
                    location: EntryLocation::Directory { directory_index },
                };
                self.observer.observe(EventPhase::Before, event, &self.store);
                let frame = self.store.allocate_directory_frame(directory_index, stamp)?;
                debug!("allocated table frame {frame} for directory entry {directory_index}");
                self.observer.observe(EventPhase::After, event, &self.store);
                Ok(ResolveOutcome::Allocated)
            }
            EntryState::Evicted(_) => {
                self.make_room()?;
                let event = PagingEvent::SwapIn {
                    location: EntryLocation::Directory { directory_index },
                };
                self.observer.observe(EventPhase::Before, event, &self.store);
                let frame = self.store.swap_in_directory(directory_index, stamp)?;
                self.faults += 1;
                self.costs.charge_swap_in();
                debug!("swapped table frame {frame} back in at directory entry {directory_index}");
                self.observer.observe(EventPhase::After, event, &self.store);
                Ok(ResolveOutcome::SwappedIn)
            }
        }
    }

    /// Makes the leaf entry resident. Every leaf ingress, first touch
    /// or swap-in, counts as a fault and goes through make-room first.
    fn resolve_leaf(
        &mut self,
        directory_index: usize,
        table_index: usize,
        stamp: u64,
    ) -> PagingResult<ResolveOutcome> {
        match self.store.leaf_entry(directory_index, table_index)?.state() {
            EntryState::Resident(_) => Ok(ResolveOutcome::Resident),
            EntryState::Unallocated => {
                self.make_room()?;
                let event = PagingEvent::Allocation {
                    location: EntryLocation::Leaf {
                        directory_index,
                        table_index,
                    },
                };
                self.observer.observe(EventPhase::Before, event, &self.store);
                let frame = self
                    .store
                    .allocate_leaf_frame(directory_index, table_index, stamp)?;
                self.faults += 1;
                debug!("allocated leaf frame {frame} at ({directory_index}, {table_index})");
                self.observer.observe(EventPhase::After, event, &self.store);
                Ok(ResolveOutcome::Allocated)
            }
            EntryState::Evicted(_) => {
                self.make_room()?;
                let event = PagingEvent::SwapIn {
                    location: EntryLocation::Leaf {
                        directory_index,
                        table_index,
                    },
                };
                self.observer.observe(EventPhase::Before, event, &self.store);
                let frame = self
                    .store
                    .swap_in_leaf(directory_index, table_index, stamp)?;
                self.faults += 1;
                self.costs.charge_swap_in();
                debug!("swapped leaf frame {frame} back in at ({directory_index}, {table_index})");
                self.observer.observe(EventPhase::After, event, &self.store);
                Ok(ResolveOutcome::SwappedIn)
            }
        }
    }

    /// Evicts one leaf victim when the working set sits over its bound.
    /// One ingress, at most one eviction; a dirty victim is written
    /// back at swap cost before it goes.
    fn make_room(&mut self) -> PagingResult<()> {
        if !self.store.working_set().over_capacity() {
            return Ok(());
        }
        let victim = evict::select_victim(&self.store).ok_or(PagingError::NoVictim)?;
        let event = PagingEvent::Eviction {
            directory_index: victim.directory_index,
            table_index: victim.table_index,
        };
        self.observer.observe(EventPhase::Before, event, &self.store);
        let evicted = self
            .store
            .evict_leaf(victim.directory_index, victim.table_index)?;
        self.evictions += 1;
        if evicted.dirty {
            self.costs.charge_write_back();
            debug!(
                "wrote back dirty leaf frame {} from ({}, {})",
                evicted.frame, evicted.directory_index, evicted.table_index
            );
        } else {
            debug!(
                "dropped clean leaf frame {} from ({}, {})",
                evicted.frame, evicted.directory_index, evicted.table_index
            );
        }
        self.observer.observe(EventPhase::After, event, &self.store);
        Ok(())
    }
}
