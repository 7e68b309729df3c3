//! Error types shared by the scan engine and its front-ends.

use thiserror::Error;

/// Result type alias for portr operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that terminate a scan abnormally.
///
/// Per-port connection failures never show up here: a probe that cannot
/// connect simply reports the port as closed.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The start of the range lies after its end.
    #[error("invalid port range: start port {start} is greater than end port {end}")]
    InvalidRange { start: u16, end: u16 },

    /// Port 0 cannot be connected to.
    #[error("invalid port range: port 0 is not a valid TCP port")]
    ZeroPort,

    /// At least one worker is needed to make progress.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// The per-probe timeout must be a positive, finite duration.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    /// The target could not be parsed or resolved to an address.
    #[error("cannot resolve target '{target}': {reason}")]
    Resolve { target: String, reason: String },

    /// A worker task died (panicked or was aborted by the runtime).
    #[error("scan worker failed: {0}")]
    Worker(String),
}

impl ScanError {
    /// True for errors that are raised before any probe is dispatched.
    pub fn is_validation(&self) -> bool {
        !matches!(self, ScanError::Worker(_))
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
