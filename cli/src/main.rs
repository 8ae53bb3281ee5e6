//! Command-line front end for the demand-paging simulator.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pagesim_cli::driver::{self, RunConfig};
use pagesim_cli::flags::RunFlags;
use pagesim_cli::logger;

/// Two-level demand-paging simulator.
///
/// Reads `p`/`r`/`w` requests from a file or stdin and reports paging
/// activity at end of run.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Request file; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Echo each serviced request to stdout.
    #[arg(short = 't', long)]
    trace: bool,

    /// Log every swap event with a structure dump to the swap file.
    #[arg(short = 's', long)]
    swap_log: bool,

    /// Path of the swap-activity log.
    #[arg(long, default_value = "swap", value_name = "PATH")]
    swap_file: PathBuf,

    /// Dump the final page structure to stdout after the report.
    #[arg(short = 'd', long)]
    dump: bool,

    /// Increase log verbosity (`-v` info, `-vv` debug).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

impl Cli {
    fn run_flags(&self) -> RunFlags {
        let mut flags = RunFlags::empty();
        flags.set(RunFlags::TRACE, self.trace);
        flags.set(RunFlags::SWAP_LOG, self.swap_log);
        flags.set(RunFlags::FINAL_DUMP, self.dump);
        flags
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbosity).context("install logger")?;

    let config = RunConfig {
        flags: cli.run_flags(),
        swap_path: cli.swap_file.clone(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.input {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("open request file {}", path.display()))?;
            driver::run(BufReader::new(file), &mut out, &config)?;
        }
        None => {
            let stdin = io::stdin();
            driver::run(stdin.lock(), &mut out, &config)?;
        }
    }
    Ok(())
}
