//! Geometry and cost constants of the simulated machine.
//!
//! The machine is word addressed with flat 32-bit addresses: the high
//! 10 bits select a directory entry, the middle 10 bits a table entry,
//! the low 12 bits the byte offset inside a leaf page.

/// Bytes per machine word; every access moves one word.
pub const WORD_BYTES: u32 = 4;

/// Entries per directory and per table. A page holds exactly one
/// table, so this is also the page size in words.
pub const PAGE_ENTRIES: usize = 1024;

/// Page size in bytes.
pub const PAGE_BYTES: u32 = PAGE_ENTRIES as u32 * WORD_BYTES;

/// Ceiling on frames the logical address space can ever name.
pub const MAX_FRAMES: usize = PAGE_ENTRIES * PAGE_ENTRIES;

pub const OFFSET_MASK: u32 = 0x0000_0fff;
pub const TABLE_MASK: u32 = 0x003f_f000;
pub const DIRECTORY_MASK: u32 = 0xffc0_0000;

pub const TABLE_SHIFT: u32 = 12;
pub const DIRECTORY_SHIFT: u32 = 22;

/// Cost of one page-structure lookup, charged per level.
pub const CYCLES_MEMORY_ACCESS: u64 = 10;

/// Cost of bringing a frame back from the swap device.
pub const CYCLES_SWAP_IN: u64 = 5000;

/// Cost of writing a dirty frame out at eviction.
pub const CYCLES_WRITE_BACK: u64 = 5000;

/// The two levels of the page structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Directory,
    Leaf,
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::Leaf => write!(f, "leaf"),
        }
    }
}
