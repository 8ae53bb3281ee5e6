//! End-of-run statistics report.

use std::io::{self, Write};

use pagesim_mm::defs::{CYCLES_SWAP_IN, CYCLES_WRITE_BACK, PAGE_BYTES};
use pagesim_mm::stats::PagingStats;

/// Prints the statistics block, tab aligned like the rest of the
/// simulator's output. A capacity of 0 means no configure request ever
/// took effect.
pub fn write_report<W: Write>(out: &mut W, stats: &PagingStats) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, " * * * Paging Activity Statistics * * *")?;
    writeln!(out)?;
    writeln!(out, "number of memory accesses\t= {}", stats.accesses)?;
    writeln!(out, "number of requests (p r w)\t= {}", stats.requests)?;
    writeln!(out, "number of page faults\t\t= {}", stats.page_faults)?;
    writeln!(out, "number of swap outs\t\t= {}", stats.evictions)?;
    writeln!(out, "total frames allocated\t\t= {}", stats.frames_allocated)?;
    writeln!(out, "frames for page tables\t\t= {}", stats.table_frames)?;
    writeln!(out, "frames for user pages\t\t= {}", stats.leaf_frames)?;
    writeln!(out, "total memory cycles\t\t= {}", stats.cycles)?;
    writeln!(out, "cycles w/o paging\t\t= {}", stats.baseline_cycles)?;
    writeln!(out, "cycles per swap in\t\t= {}", CYCLES_SWAP_IN)?;
    writeln!(out, "cycles per swap out\t\t= {}", CYCLES_WRITE_BACK)?;
    writeln!(out, "last working set size\t\t= {}", stats.working_set)?;
    writeln!(out, "max working set size ever\t= {}", stats.working_set_peak)?;
    writeln!(out, "max physical pages\t\t= {}", stats.capacity.unwrap_or(0))?;
    writeln!(out, "page size\t\t\t= {}", PAGE_BYTES)?;
    writeln!(out, "replacement algorithm\t\t= lru")?;
    Ok(())
}
