//! Access trace in the classic five-triples-per-row layout.

use std::io::{self, Write};

use pagesim_mm::request::{AccessKind, Request};

/// Echoes each serviced request as a fixed-width triple. A newline
/// opens every fifth triple, so the trace reads in rows of five.
#[derive(Default)]
pub struct TraceWriter {
    printed: u64,
}

impl TraceWriter {
    pub fn new() -> Self {
        Self { printed: 0 }
    }

    pub fn record<W: Write>(&mut self, out: &mut W, request: &Request) -> io::Result<()> {
        if self.printed % 5 == 0 {
            writeln!(out)?;
        }
        self.printed += 1;

        match request {
            Request::Configure { capacity } => write!(out, "p{:>5}      ", capacity),
            Request::Access { kind, addr, value } => {
                write!(out, "{}{:>5}", kind.symbol(), addr.as_u32())?;
                match (kind, value) {
                    (AccessKind::Write, Some(value)) => write!(out, "{:>4} ", value),
                    _ => write!(out, "      "),
                }
            }
        }
    }

    /// Closes the last row.
    pub fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out)
    }
}
