//! Least-recently-used victim selection.
//!
//! The sweep walks every present directory entry, then every resident
//! leaf entry under it, and remembers the smallest access stamp. Only
//! leaf entries are ever candidates; the frames backing tables stay
//! resident for the life of the run.

use log::debug;

use crate::error::{PagingError, PagingResult};
use crate::paging::{EntryState, EvictedLeaf, PagingStore};

/// Location and stamp of an eviction candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Victim {
    pub directory_index: usize,
    pub table_index: usize,
    pub last_access: u64,
}

/// Returns the resident leaf entry with the minimum access stamp, or
/// `None` when no leaf entry is resident anywhere. Ties go to the first
/// candidate in scan order: lowest directory index, then lowest table
/// index.
pub fn select_victim(store: &PagingStore) -> Option<Victim> {
    let mut best: Option<Victim> = None;

    for (directory_index, dir_entry) in store.directory().iter().enumerate() {
        let EntryState::Resident(table_frame) = dir_entry.state() else {
            continue;
        };
        let Ok(table) = store.arena().table(table_frame) else {
            continue;
        };
        for (table_index, leaf) in table.iter().enumerate() {
            if !leaf.is_present() {
                continue;
            }
            // Strict comparison keeps the first minimum encountered.
            if best.is_none_or(|b| leaf.last_access() < b.last_access) {
                best = Some(Victim {
                    directory_index,
                    table_index,
                    last_access: leaf.last_access(),
                });
            }
        }
    }

    best
}

/// Evicts the least-recently-used resident leaf entry and reports what
/// was flipped out. An empty sweep means the structure holds no
/// reclaimable frame at all; callers treat that as fatal.
pub fn evict_one(store: &mut PagingStore) -> PagingResult<EvictedLeaf> {
    let victim = select_victim(store).ok_or(PagingError::NoVictim)?;
    let evicted = store.evict_leaf(victim.directory_index, victim.table_index)?;
    debug!(
        "evicted leaf frame {} at ({}, {}), last access {}",
        evicted.frame, evicted.directory_index, evicted.table_index, evicted.last_access
    );
    Ok(evicted)
}
