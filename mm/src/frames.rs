//! Frame arena.
//!
//! Every simulated page, whether it backs a second-level table or a
//! leaf data page, is a `Frame` owned by the arena and named by its
//! `FrameId`. Frames are allocated on demand, counted per kind, and
//! never released: eviction is a bookkeeping flip in the page
//! structure, not a return to any pool.

use std::fmt;

use crate::defs::MAX_FRAMES;
use crate::error::{PagingError, PagingResult};
use crate::paging::PageTable;

/// Stable identity of an allocated frame. Survives eviction and
/// swap-in; a given entry refers to the same frame for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FrameId(u32);

impl FrameId {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An allocated unit of simulated storage. Table frames own the entries
/// they back; leaf content is not modeled, only its existence.
enum Frame {
    Table(PageTable),
    Leaf,
}

// ============================================================================
// Arena
// ============================================================================

#[derive(Default)]
pub struct FrameArena {
    frames: Vec<Frame>,
    table_frames: u64,
    leaf_frames: u64,
}

impl FrameArena {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            table_frames: 0,
            leaf_frames: 0,
        }
    }

    /// Allocates a frame backing a second-level table.
    pub fn alloc_table(&mut self) -> PagingResult<FrameId> {
        let id = self.next_id()?;
        self.frames.push(Frame::Table(PageTable::new()));
        self.table_frames += 1;
        Ok(id)
    }

    /// Allocates a leaf data frame.
    pub fn alloc_leaf(&mut self) -> PagingResult<FrameId> {
        let id = self.next_id()?;
        self.frames.push(Frame::Leaf);
        self.leaf_frames += 1;
        Ok(id)
    }

    fn next_id(&self) -> PagingResult<FrameId> {
        let next = self.frames.len();
        if next >= MAX_FRAMES {
            return Err(PagingError::AddressSpaceExhausted { allocated: next });
        }
        Ok(FrameId(next as u32))
    }

    /// Resolves a table-backing frame to its entries.
    pub fn table(&self, id: FrameId) -> PagingResult<&PageTable> {
        match self.frames.get(id.index()) {
            Some(Frame::Table(table)) => Ok(table),
            _ => Err(PagingError::InvalidFrame { id }),
        }
    }

    pub fn table_mut(&mut self, id: FrameId) -> PagingResult<&mut PageTable> {
        match self.frames.get_mut(id.index()) {
            Some(Frame::Table(table)) => Ok(table),
            _ => Err(PagingError::InvalidFrame { id }),
        }
    }

    /// Total frames ever allocated.
    #[inline]
    pub fn allocated(&self) -> u64 {
        self.frames.len() as u64
    }

    #[inline]
    pub const fn table_frames(&self) -> u64 {
        self.table_frames
    }

    #[inline]
    pub const fn leaf_frames(&self) -> u64 {
        self.leaf_frames
    }
}
