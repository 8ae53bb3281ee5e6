//! Stderr logger backing the `log` facade.
//!
//! All diagnostics go to stderr so the access trace, the statistics
//! report, and the final dump own stdout.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("{:5} {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Installs the logger. Verbosity occurrences map to warn, info, then
/// debug; filtering happens at the facade's max level.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
