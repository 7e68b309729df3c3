use std::fmt;

/// Outcome of a single connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeResult {
    pub port: u16,
    pub open: bool,
}

impl ProbeResult {
    pub fn open(port: u16) -> Self {
        Self { port, open: true }
    }

    pub fn closed(port: u16) -> Self {
        Self { port, open: false }
    }
}

/// A progress snapshot taken by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            100.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        Self {
            completed,
            total,
            percentage,
        }
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.completed, self.total, self.percentage)
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
