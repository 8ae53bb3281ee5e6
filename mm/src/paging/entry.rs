//! Page structure entries and their state machine.

use crate::frames::FrameId;

/// Allocation and residency state of one entry.
///
/// `Unallocated` entries have never been touched. Once a frame is
/// bound the entry alternates between `Resident` and `Evicted`, always
/// keeping the same frame identity; only leaf entries ever reach
/// `Evicted` in practice, since directory entries are exempt from
/// eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Unallocated,
    Resident(FrameId),
    Evicted(FrameId),
}

/// One slot in the directory or in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    state: EntryState,
    dirty: bool,
    last_access: u64,
}

impl Entry {
    pub const EMPTY: Self = Self {
        state: EntryState::Unallocated,
        dirty: false,
        last_access: 0,
    };

    #[inline]
    pub const fn state(&self) -> EntryState {
        self.state
    }

    /// The backing frame, if one was ever bound.
    #[inline]
    pub const fn frame(&self) -> Option<FrameId> {
        match self.state {
            EntryState::Unallocated => None,
            EntryState::Resident(id) | EntryState::Evicted(id) => Some(id),
        }
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self.state, EntryState::Resident(_))
    }

    #[inline]
    pub const fn is_allocated(&self) -> bool {
        !matches!(self.state, EntryState::Unallocated)
    }

    #[inline]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub const fn last_access(&self) -> u64 {
        self.last_access
    }

    /// Binds a fresh frame on first touch.
    pub(crate) fn allocate(&mut self, frame: FrameId, stamp: u64) {
        debug_assert!(matches!(self.state, EntryState::Unallocated));
        self.state = EntryState::Resident(frame);
        self.dirty = false;
        self.last_access = stamp;
    }

    /// Brings an evicted entry back to residency. The dirty bit is
    /// cleared; the entry starts a fresh modification history.
    pub(crate) fn swap_in(&mut self, stamp: u64) -> FrameId {
        let EntryState::Evicted(frame) = self.state else {
            unreachable!("swap-in of an entry that is not evicted");
        };
        self.state = EntryState::Resident(frame);
        self.dirty = false;
        self.last_access = stamp;
        frame
    }

    /// Flips a resident entry out. Returns the frame and whether it was
    /// dirty at eviction time; the dirty bit itself is left in place
    /// until the next swap-in.
    pub(crate) fn evict(&mut self) -> (FrameId, bool) {
        let EntryState::Resident(frame) = self.state else {
            unreachable!("eviction of an entry that is not resident");
        };
        self.state = EntryState::Evicted(frame);
        (frame, self.dirty)
    }

    #[inline]
    pub(crate) fn touch(&mut self, stamp: u64) {
        self.last_access = stamp;
    }

    #[inline]
    pub(crate) fn set_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::EMPTY
    }
}
