//! Request-stream parser.
//!
//! The input is a whitespace-separated token stream; line boundaries
//! carry no meaning. Malformed input degrades gracefully: unknown
//! action tokens are reported and skipped, a bad operand abandons just
//! that request, and end of input in the middle of a request ends the
//! run.

use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::warn;

use pagesim_mm::addr::VirtAddr;
use pagesim_mm::request::Request;

/// Outcome of one parse attempt. `Malformed` means tokens were
/// consumed but produced nothing; the caller moves on.
enum Parsed {
    Request(Request),
    Malformed,
    EndOfInput,
}

enum Operand<T> {
    Value(T),
    Bad,
    Eof,
}

pub struct RequestReader<R> {
    input: R,
    tokens: VecDeque<String>,
}

impl<R: BufRead> RequestReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            tokens: VecDeque::new(),
        }
    }

    /// The next well-formed request, or `None` once the stream ends.
    pub fn next_request(&mut self) -> Result<Option<Request>> {
        loop {
            let Some(action) = self.next_token()? else {
                return Ok(None);
            };
            let parsed = match action.as_str() {
                "p" => self.configure()?,
                "r" => self.read_access()?,
                "w" => self.write_access()?,
                other => {
                    warn!("illegal action '{other}', only p r w allowed");
                    continue;
                }
            };
            match parsed {
                Parsed::Request(request) => return Ok(Some(request)),
                Parsed::Malformed => continue,
                Parsed::EndOfInput => return Ok(None),
            }
        }
    }

    fn configure(&mut self) -> Result<Parsed> {
        Ok(match self.operand::<u32>("p", "page capacity")? {
            Operand::Value(capacity) => Parsed::Request(Request::Configure { capacity }),
            Operand::Bad => Parsed::Malformed,
            Operand::Eof => Parsed::EndOfInput,
        })
    }

    fn read_access(&mut self) -> Result<Parsed> {
        Ok(match self.operand::<u32>("r", "address")? {
            Operand::Value(address) => Parsed::Request(Request::read(VirtAddr::new(address))),
            Operand::Bad => Parsed::Malformed,
            Operand::Eof => Parsed::EndOfInput,
        })
    }

    fn write_access(&mut self) -> Result<Parsed> {
        let address = match self.operand::<u32>("w", "address")? {
            Operand::Value(address) => address,
            Operand::Bad => return Ok(Parsed::Malformed),
            Operand::Eof => return Ok(Parsed::EndOfInput),
        };
        Ok(match self.operand::<i32>("w", "value")? {
            Operand::Value(value) => {
                Parsed::Request(Request::write(VirtAddr::new(address), value))
            }
            Operand::Bad => Parsed::Malformed,
            Operand::Eof => Parsed::EndOfInput,
        })
    }

    fn operand<T: FromStr>(&mut self, action: &str, what: &str) -> Result<Operand<T>> {
        let Some(token) = self.next_token()? else {
            warn!("end of input inside '{action}' request");
            return Ok(Operand::Eof);
        };
        match token.parse::<T>() {
            Ok(value) => Ok(Operand::Value(value)),
            Err(_) => {
                warn!("bad {what} '{token}' in '{action}' request, skipping");
                Ok(Operand::Bad)
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self
                .input
                .read_line(&mut line)
                .context("read request stream")?
                == 0
            {
                return Ok(None);
            }
            self.tokens
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}
