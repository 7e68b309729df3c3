use std::fmt;

use crate::error::{Result, ScanError};

/// An inclusive range of TCP ports, `start..=end`.
///
/// Outside this crate a range can only come from [`PortRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    pub(crate) start_port: u16,
    pub(crate) end_port: u16,
}

impl PortRange {
    /// Builds a range, rejecting `start > end` and port 0.
    pub fn new(start_port: u16, end_port: u16) -> Result<Self> {
        let range = Self {
            start_port,
            end_port,
        };
        range.check()?;
        Ok(range)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.start_port > self.end_port {
            return Err(ScanError::InvalidRange {
                start: self.start_port,
                end: self.end_port,
            });
        }
        if self.start_port == 0 {
            return Err(ScanError::ZeroPort);
        }
        Ok(())
    }

    pub fn start(&self) -> u16 {
        self.start_port
    }

    pub fn end(&self) -> u16 {
        self.end_port
    }

    /// Number of ports in the range. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        usize::from(self.end_port.saturating_sub(self.start_port)) + 1
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_port, self.end_port)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
