//! Error types for the paging simulation.
//!
//! One enum covers the whole crate: configuration problems, malformed
//! addresses, and the invariant violations that must abort a run. The
//! CLI decides which variants are fatal; the core only reports them.

use std::error;
use std::fmt;

use crate::defs::Level;
use crate::frames::FrameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingError {
    /// A read or write arrived before any capacity was configured.
    CapacityUnset,
    /// A second configure request tried to change the capacity.
    CapacityAlreadySet { current: u32 },
    /// A configure request asked for a zero-frame working set.
    InvalidCapacity { requested: u32 },
    NotAligned { address: u32, required: u32 },
    /// Total allocated frames would exceed the logical address space.
    AddressSpaceExhausted { allocated: usize },
    /// Eviction was required but no resident leaf entry exists.
    NoVictim,
    NotResident { level: Level, directory_index: usize, table_index: usize },
    InvalidFrame { id: FrameId },
}

impl fmt::Display for PagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityUnset => {
                write!(f, "no physical page capacity configured before first access")
            }
            Self::CapacityAlreadySet { current } => {
                write!(f, "physical pages already set to {}", current)
            }
            Self::InvalidCapacity { requested } => {
                write!(f, "physical page capacity must be nonzero, got {}", requested)
            }
            Self::NotAligned { address, required } => {
                write!(f, "address {:#x} not aligned to the {} byte word size", address, required)
            }
            Self::AddressSpaceExhausted { allocated } => {
                write!(f, "logical address space exhausted after {} frames", allocated)
            }
            Self::NoVictim => {
                write!(f, "no resident leaf frame available for eviction")
            }
            Self::NotResident {
                level,
                directory_index,
                table_index,
            } => {
                write!(
                    f,
                    "{} entry at ({}, {}) is not resident",
                    level, directory_index, table_index
                )
            }
            Self::InvalidFrame { id } => {
                write!(f, "invalid frame reference {}", id)
            }
        }
    }
}

impl error::Error for PagingError {}

/// Convenience result type for paging operations.
pub type PagingResult<T = ()> = Result<T, PagingError>;
