//! Output switches of a simulation run.

use bitflags::bitflags;

bitflags! {
    /// Which optional output surfaces a run produces. The statistics
    /// report always prints; everything else is opt-in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RunFlags: u8 {
        /// Echo each serviced request to stdout.
        const TRACE      = 1 << 0;
        /// Write the swap activity log file.
        const SWAP_LOG   = 1 << 1;
        /// Dump the page structure after the report.
        const FINAL_DUMP = 1 << 2;
    }
}
