//! Run counters exposed to the statistics sink.

/// Snapshot of everything the end-of-run report prints. Plain data so
/// sinks outside this crate can format it however they like.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PagingStats {
    /// Memory accesses serviced (reads plus writes).
    pub accesses: u64,
    /// Requests applied, including ignored capacity requests.
    pub requests: u64,
    /// Leaf first-touch allocations plus swap-ins at either level.
    pub page_faults: u64,
    /// Successful evictions.
    pub evictions: u64,
    /// Frames handed out over the whole run, split by kind below.
    pub frames_allocated: u64,
    pub table_frames: u64,
    pub leaf_frames: u64,
    /// Cycles spent with paging in place.
    pub cycles: u64,
    /// Cycles the same accesses would cost flat, without paging.
    pub baseline_cycles: u64,
    /// Resident frames at end of run and the high-water mark.
    pub working_set: u32,
    pub working_set_peak: u32,
    /// Configured working-set bound, if any request ever set one.
    pub capacity: Option<u32>,
}
