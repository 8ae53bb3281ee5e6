//! Request loop wiring the parser, pager, and output sinks together.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use pagesim_mm::demand::DemandPager;
use pagesim_mm::observe::{ActivityObserver, NullObserver};
use pagesim_mm::stats::PagingStats;

use crate::flags::RunFlags;
use crate::parse::RequestReader;
use crate::report;
use crate::swaplog::{self, SwapActivityLog};
use crate::trace::TraceWriter;

/// Everything a run needs beyond the request stream itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub flags: RunFlags,
    /// Where the swap-activity log lands when `RunFlags::SWAP_LOG` is set.
    pub swap_path: PathBuf,
}

/// Drives a whole simulation: reads requests from `input`, applies each
/// one, and writes the access trace, the statistics report, and the
/// optional final structure dump to `out`.
///
/// A request the pager rejects aborts the run with context naming the
/// offending request. Returns the final statistics snapshot.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    config: &RunConfig,
) -> Result<PagingStats> {
    let observer: Box<dyn ActivityObserver> = if config.flags.contains(RunFlags::SWAP_LOG) {
        let log = SwapActivityLog::create(&config.swap_path)
            .with_context(|| format!("create swap log {}", config.swap_path.display()))?;
        Box::new(log)
    } else {
        Box::new(NullObserver)
    };

    let mut pager = DemandPager::with_observer(observer);
    let mut reader = RequestReader::new(input);
    let mut trace = TraceWriter::new();

    while let Some(request) = reader.next_request()? {
        pager
            .apply(request)
            .with_context(|| format!("request {} ('{}')", pager.stats().requests, request))?;
        if config.flags.contains(RunFlags::TRACE) {
            trace.record(out, &request).context("write access trace")?;
        }
    }
    if config.flags.contains(RunFlags::TRACE) {
        trace.finish(out).context("write access trace")?;
    }

    let stats = pager.stats();
    report::write_report(out, &stats).context("write statistics report")?;

    if config.flags.contains(RunFlags::FINAL_DUMP) {
        writeln!(out).context("write final dump")?;
        swaplog::write_page_structure(out, pager.store()).context("write final dump")?;
    }

    // Dropping the pager drops the observer, which flushes the swap log.
    drop(pager);
    Ok(stats)
}
