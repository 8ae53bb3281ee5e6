//! The two-level page structure and its mutation primitives.
//!
//! The store owns the directory, the frame arena, and the working-set
//! counter, and keeps them consistent: every state flip that makes an
//! entry resident or evicted adjusts the working set in the same call.
//! Policy (when to allocate, when to evict, whom to evict) lives in the
//! demand-paging controller and the eviction sweep, not here.

use super::entry::{Entry, EntryState};
use super::tables::PageTable;
use crate::defs::Level;
use crate::error::{PagingError, PagingResult};
use crate::frames::{FrameArena, FrameId};
use crate::working_set::WorkingSet;

/// What the eviction of a leaf entry observed, for cost accounting and
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictedLeaf {
    pub directory_index: usize,
    pub table_index: usize,
    pub frame: FrameId,
    pub dirty: bool,
    pub last_access: u64,
}

#[derive(Default)]
pub struct PagingStore {
    directory: PageTable,
    arena: FrameArena,
    working_set: WorkingSet,
}

impl PagingStore {
    pub fn new() -> Self {
        Self {
            directory: PageTable::new(),
            arena: FrameArena::new(),
            working_set: WorkingSet::new(),
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    #[inline]
    pub fn directory(&self) -> &PageTable {
        &self.directory
    }

    #[inline]
    pub fn arena(&self) -> &FrameArena {
        &self.arena
    }

    #[inline]
    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    #[inline]
    pub fn directory_entry(&self, directory_index: usize) -> &Entry {
        self.directory.entry(directory_index)
    }

    /// The leaf entry under a resident directory entry.
    pub fn leaf_entry(&self, directory_index: usize, table_index: usize) -> PagingResult<&Entry> {
        let frame = self.resident_table(directory_index, table_index)?;
        Ok(self.arena.table(frame)?.entry(table_index))
    }

    /// Resident entries at both levels. The working set must always
    /// agree with this number.
    pub fn count_resident(&self) -> u64 {
        let mut total = 0u64;
        for entry in self.directory.iter() {
            if let EntryState::Resident(frame) = entry.state() {
                total += 1;
                if let Ok(table) = self.arena.table(frame) {
                    total += table.resident_count() as u64;
                }
            }
        }
        total
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    pub fn set_capacity(&mut self, frames: u32) -> PagingResult {
        self.working_set.set_capacity(frames)
    }

    /// First touch of a directory slot: allocates the frame backing its
    /// table and makes the entry resident.
    pub fn allocate_directory_frame(
        &mut self,
        directory_index: usize,
        stamp: u64,
    ) -> PagingResult<FrameId> {
        debug_assert!(!self.directory.entry(directory_index).is_allocated());
        let frame = self.arena.alloc_table()?;
        self.directory.entry_mut(directory_index).allocate(frame, stamp);
        self.working_set.increment();
        Ok(frame)
    }

    /// First touch of a leaf slot under a resident directory entry.
    pub fn allocate_leaf_frame(
        &mut self,
        directory_index: usize,
        table_index: usize,
        stamp: u64,
    ) -> PagingResult<FrameId> {
        let table_frame = self.resident_table(directory_index, table_index)?;
        let frame = self.arena.alloc_leaf()?;
        let table = self.arena.table_mut(table_frame)?;
        debug_assert!(!table.entry(table_index).is_allocated());
        table.entry_mut(table_index).allocate(frame, stamp);
        self.working_set.increment();
        Ok(frame)
    }

    /// Restores an evicted directory entry. The table it backs kept its
    /// contents; only the residency flag and stamp change. Refuses
    /// entries that are not evicted.
    pub fn swap_in_directory(
        &mut self,
        directory_index: usize,
        stamp: u64,
    ) -> PagingResult<FrameId> {
        let entry = self.directory.entry_mut(directory_index);
        if !matches!(entry.state(), EntryState::Evicted(_)) {
            return Err(PagingError::NotResident {
                level: Level::Directory,
                directory_index,
                table_index: 0,
            });
        }
        let frame = entry.swap_in(stamp);
        self.working_set.increment();
        Ok(frame)
    }

    pub fn swap_in_leaf(
        &mut self,
        directory_index: usize,
        table_index: usize,
        stamp: u64,
    ) -> PagingResult<FrameId> {
        let table_frame = self.resident_table(directory_index, table_index)?;
        let table = self.arena.table_mut(table_frame)?;
        let entry = table.entry_mut(table_index);
        if !matches!(entry.state(), EntryState::Evicted(_)) {
            return Err(PagingError::NotResident {
                level: Level::Leaf,
                directory_index,
                table_index,
            });
        }
        let frame = entry.swap_in(stamp);
        self.working_set.increment();
        Ok(frame)
    }

    /// Flips a resident leaf entry out and reports what was evicted.
    pub fn evict_leaf(
        &mut self,
        directory_index: usize,
        table_index: usize,
    ) -> PagingResult<EvictedLeaf> {
        let table_frame = self.resident_table(directory_index, table_index)?;
        let table = self.arena.table_mut(table_frame)?;
        let entry = table.entry_mut(table_index);
        if !entry.is_present() {
            return Err(PagingError::NotResident {
                level: Level::Leaf,
                directory_index,
                table_index,
            });
        }
        let last_access = entry.last_access();
        let (frame, dirty) = entry.evict();
        self.working_set.decrement();
        Ok(EvictedLeaf {
            directory_index,
            table_index,
            frame,
            dirty,
            last_access,
        })
    }

    /// Re-stamps a resident leaf entry with the current clock value.
    pub fn stamp_leaf(
        &mut self,
        directory_index: usize,
        table_index: usize,
        stamp: u64,
    ) -> PagingResult {
        let entry = self.resident_leaf_mut(directory_index, table_index)?;
        entry.touch(stamp);
        Ok(())
    }

    /// Marks a resident leaf entry as modified.
    pub fn mark_leaf_dirty(&mut self, directory_index: usize, table_index: usize) -> PagingResult {
        let entry = self.resident_leaf_mut(directory_index, table_index)?;
        entry.set_dirty();
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn resident_table(&self, directory_index: usize, table_index: usize) -> PagingResult<FrameId> {
        match self.directory.entry(directory_index).state() {
            EntryState::Resident(frame) => Ok(frame),
            _ => Err(PagingError::NotResident {
                level: Level::Directory,
                directory_index,
                table_index,
            }),
        }
    }

    fn resident_leaf_mut(
        &mut self,
        directory_index: usize,
        table_index: usize,
    ) -> PagingResult<&mut Entry> {
        let table_frame = self.resident_table(directory_index, table_index)?;
        let entry = self.arena.table_mut(table_frame)?.entry_mut(table_index);
        if !entry.is_present() {
            return Err(PagingError::NotResident {
                level: Level::Leaf,
                directory_index,
                table_index,
            });
        }
        Ok(entry)
    }
}
