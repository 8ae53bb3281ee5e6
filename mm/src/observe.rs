//! Observation seam for paging activity.
//!
//! The controller reports every structural change twice, once before
//! and once after it lands, handing the observer a read-only view of
//! the store so sinks can dump the surrounding state. The null
//! observer makes the seam free when nothing is listening.

use core::fmt;

use crate::paging::PagingStore;

/// Whether the reported event is about to happen or just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Before,
    After,
}

impl fmt::Display for EventPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// Position of the entry an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLocation {
    Directory { directory_index: usize },
    Leaf { directory_index: usize, table_index: usize },
}

impl fmt::Display for EntryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory { directory_index } => {
                write!(f, "directory entry {directory_index}")
            }
            Self::Leaf {
                directory_index,
                table_index,
            } => write!(f, "entry ({directory_index}, {table_index})"),
        }
    }
}

/// A structural change applied by the demand-paging controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingEvent {
    /// Fresh frame handed out on first touch.
    Allocation { location: EntryLocation },
    /// Previously evicted frame flipped back to resident.
    SwapIn { location: EntryLocation },
    /// Resident leaf entry flipped out to make room.
    Eviction {
        directory_index: usize,
        table_index: usize,
    },
}

impl fmt::Display for PagingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation { location } => write!(f, "allocation at {location}"),
            Self::SwapIn { location } => write!(f, "swap-in at {location}"),
            Self::Eviction {
                directory_index,
                table_index,
            } => write!(f, "eviction at entry ({directory_index}, {table_index})"),
        }
    }
}

/// Sink for paging events. Implementations must not mutate the store;
/// they only get to look.
pub trait ActivityObserver {
    fn observe(&mut self, phase: EventPhase, event: PagingEvent, store: &PagingStore);
}

/// Observer that drops everything on the floor. Default sink when no
/// activity log was requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ActivityObserver for NullObserver {
    fn observe(&mut self, _phase: EventPhase, _event: PagingEvent, _store: &PagingStore) {}
}

impl<O: ActivityObserver + ?Sized> ActivityObserver for Box<O> {
    fn observe(&mut self, phase: EventPhase, event: PagingEvent, store: &PagingStore) {
        (**self).observe(phase, event, store);
    }
}
