//! Flat 32-bit addresses and their decomposition into paging indices.

use std::fmt;

use crate::defs::{
    DIRECTORY_MASK, DIRECTORY_SHIFT, OFFSET_MASK, PAGE_ENTRIES, TABLE_MASK, TABLE_SHIFT, WORD_BYTES,
};
use crate::error::{PagingError, PagingResult};

/// A flat address in the simulated 32-bit logical address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct VirtAddr(pub u32);

impl VirtAddr {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn directory_index(self) -> usize {
        ((self.0 & DIRECTORY_MASK) >> DIRECTORY_SHIFT) as usize
    }

    #[inline]
    pub const fn table_index(self) -> usize {
        ((self.0 & TABLE_MASK) >> TABLE_SHIFT) as usize
    }

    #[inline]
    pub const fn offset(self) -> usize {
        (self.0 & OFFSET_MASK) as usize
    }

    #[inline]
    pub const fn is_word_aligned(self) -> bool {
        self.0 % WORD_BYTES == 0
    }

    /// Splits the address into directory index, table index, and page
    /// offset. Rejects addresses whose offset is not word aligned; the
    /// simulated machine only issues word accesses.
    pub fn decompose(self) -> PagingResult<PageIndices> {
        if !self.is_word_aligned() {
            return Err(PagingError::NotAligned {
                address: self.0,
                required: WORD_BYTES,
            });
        }

        let directory = self.directory_index();
        let table = self.table_index();
        debug_assert!(directory < PAGE_ENTRIES);
        debug_assert!(table < PAGE_ENTRIES);

        Ok(PageIndices {
            directory,
            table,
            offset: self.offset(),
        })
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// The result of decomposing an address: high 10 bits select the
/// directory entry, middle 10 bits the table entry, low 12 bits the
/// byte offset within the leaf page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndices {
    pub directory: usize,
    pub table: usize,
    pub offset: usize,
}
