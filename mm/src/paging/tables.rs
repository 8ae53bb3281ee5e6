use std::ops::{Index, IndexMut};

use super::entry::Entry;
use crate::defs::PAGE_ENTRIES;

/// A 1024-entry page table. The directory and every second-level table
/// share this shape; only their position in the structure differs.
#[derive(Debug)]
pub struct PageTable {
    entries: Box<[Entry; PAGE_ENTRIES]>,
}

impl PageTable {
    pub fn new() -> Self {
        Self {
            entries: Box::new([Entry::EMPTY; PAGE_ENTRIES]),
        }
    }

    #[inline]
    pub fn entry(&self, index: usize) -> &Entry {
        &self.entries[index]
    }

    #[inline]
    pub fn entry_mut(&mut self, index: usize) -> &mut Entry {
        &mut self.entries[index]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Number of resident entries in this table.
    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_present()).count()
    }
}

impl Index<usize> for PageTable {
    type Output = Entry;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl IndexMut<usize> for PageTable {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index]
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}
