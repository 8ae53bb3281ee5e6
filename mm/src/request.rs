//! Parsed request forms driving the simulation.

use core::fmt;

use crate::addr::VirtAddr;

/// Direction of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    /// Action character used by the request syntax and the access trace.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
        }
    }
}

/// One request from the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// `p <capacity>`: bound the shared working set. Honored once.
    Configure { capacity: u32 },
    /// `r <addr>` or `w <addr> <value>`. The value rides along for the
    /// access trace only; frames carry no data.
    Access {
        kind: AccessKind,
        addr: VirtAddr,
        value: Option<i32>,
    },
}

impl Request {
    #[inline]
    pub const fn read(addr: VirtAddr) -> Self {
        Self::Access {
            kind: AccessKind::Read,
            addr,
            value: None,
        }
    }

    #[inline]
    pub const fn write(addr: VirtAddr, value: i32) -> Self {
        Self::Access {
            kind: AccessKind::Write,
            addr,
            value: Some(value),
        }
    }
}

impl fmt::Display for Request {
    /// Renders the request in its input syntax, e.g. `w 4096 7`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Configure { capacity } => write!(f, "p {capacity}"),
            Self::Access {
                kind,
                addr,
                value: Some(value),
            } => write!(f, "{} {} {value}", kind.symbol(), addr.as_u32()),
            Self::Access { kind, addr, .. } => {
                write!(f, "{} {}", kind.symbol(), addr.as_u32())
            }
        }
    }
}
