use std::fmt;

use crate::network::range::PortRange;

/// The sorted result of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub host: String,
    pub range: PortRange,
    open_ports: Vec<u16>,
}

impl ScanReport {
    /// Builds a report from open ports in any order.
    ///
    /// The ports are sorted ascending and duplicates are dropped.
    pub fn new(host: impl Into<String>, range: PortRange, mut open_ports: Vec<u16>) -> Self {
        open_ports.sort_unstable();
        open_ports.dedup();

        Self {
            host: host.into(),
            range,
            open_ports,
        }
    }

    /// Open ports, strictly ascending.
    pub fn open_ports(&self) -> &[u16] {
        &self.open_ports
    }

    pub fn has_open_ports(&self) -> bool {
        !self.open_ports.is_empty()
    }

    /// Comma-joined open ports, or `"none"`.
    pub fn joined_ports(&self) -> String {
        if self.open_ports.is_empty() {
            return "none".to_string();
        }

        self.open_ports
            .iter()
            .map(|port| port.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    }
}

/// How a scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every port in the range was probed.
    Completed(ScanReport),
    /// The scan was interrupted; the report only covers finished probes.
    Cancelled { report: ScanReport, completed: usize },
}

impl ScanOutcome {
    pub fn report(&self) -> &ScanReport {
        match self {
            ScanOutcome::Completed(report) => report,
            ScanOutcome::Cancelled { report, .. } => report,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScanOutcome::Cancelled { .. })
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Target: {}", self.host)?;
        writeln!(f, "Range: {}", self.range)?;
        writeln!(f, "Open ports: {}", self.joined_ports())
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
