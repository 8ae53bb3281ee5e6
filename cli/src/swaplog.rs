//! Swap activity log and the page-structure dump it shares with the
//! final dump switch.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::warn;

use pagesim_mm::observe::{ActivityObserver, EventPhase, PagingEvent};
use pagesim_mm::paging::{EntryState, PagingStore};

/// Observer writing the swap activity file: one banner per phase of
/// every paging event, each followed by a dump of the whole structure.
pub struct SwapActivityLog {
    out: BufWriter<File>,
    failed: bool,
}

impl SwapActivityLog {
    /// Creates the log file and writes its header line.
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "swap information.")?;
        Ok(Self { out, failed: false })
    }

    fn write_event(
        &mut self,
        phase: EventPhase,
        event: PagingEvent,
        store: &PagingStore,
    ) -> io::Result<()> {
        writeln!(self.out, "\n * * * {phase} {event} * * *")?;
        writeln!(self.out)?;
        write_page_structure(&mut self.out, store)
    }
}

impl ActivityObserver for SwapActivityLog {
    fn observe(&mut self, phase: EventPhase, event: PagingEvent, store: &PagingStore) {
        if self.failed {
            return;
        }
        if let Err(err) = self.write_event(phase, event, store) {
            warn!("swap log write failed: {err}; disabling the log");
            self.failed = true;
        }
    }
}

impl Drop for SwapActivityLog {
    fn drop(&mut self) {
        if let Err(err) = self.out.flush() {
            warn!("swap log flush failed: {err}");
        }
    }
}

/// Dumps every present entry of the page structure: the directory
/// first, then the leaf entries under each present directory entry.
/// Frame numbers stand in for physical addresses.
pub fn write_page_structure<W: Write>(out: &mut W, store: &PagingStore) -> io::Result<()> {
    writeln!(out, "Dumping Page Directory:")?;
    for (pdx, entry) in store.directory().iter().enumerate() {
        if !entry.is_present() {
            continue;
        }
        if let Some(frame) = entry.frame() {
            writeln!(out, "pd[{pdx}].frame = {frame}")?;
        }
        writeln!(out, "pd[{pdx}].lru = {}", entry.last_access())?;
    }

    writeln!(out)?;
    writeln!(out, "Dumping Page Tables:")?;
    for (pdx, dir_entry) in store.directory().iter().enumerate() {
        let EntryState::Resident(table_frame) = dir_entry.state() else {
            continue;
        };
        let Ok(table) = store.arena().table(table_frame) else {
            continue;
        };
        writeln!(out, "Page Dir entry {pdx}")?;
        for (ptx, leaf) in table.iter().enumerate() {
            if !leaf.is_present() {
                continue;
            }
            let Some(frame) = leaf.frame() else {
                continue;
            };
            write!(out, "pt[{ptx}].frame = {frame}, lru = {}", leaf.last_access())?;
            if leaf.dirty() {
                write!(out, ", written")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
