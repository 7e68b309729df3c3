use portr_common::Result;
use portr_common::scan::report::{ScanOutcome, ScanReport};
use portr_common::scan::request::ScanRequest;
use portr_common::scan::result::{ProbeResult, Progress};
use tracing::debug;

use super::dispatcher::{DispatchStatus, ResultStream};

/// A progress snapshot is emitted every this many completed probes.
pub const PROGRESS_INTERVAL: usize = 100;

/// Receives scan events as the aggregator processes results.
pub trait ScanObserver: Send {
    fn on_progress(&mut self, _progress: Progress) {}

    fn on_open_port(&mut self, _port: u16) {}
}

/// The silent observer.
impl ScanObserver for () {}

/// Single consumer of a [`ResultStream`].
pub struct Aggregator<'a, O: ScanObserver> {
    request: &'a ScanRequest,
    observer: &'a mut O,
    completed: usize,
    open_ports: Vec<u16>,
}

impl<'a, O: ScanObserver> Aggregator<'a, O> {
    pub fn new(request: &'a ScanRequest, observer: &'a mut O) -> Self {
        Self {
            request,
            observer,
            completed: 0,
            open_ports: Vec::new(),
        }
    }

    /// Drains `stream` and builds the outcome.
    pub async fn consume(mut self, mut stream: ResultStream) -> Result<ScanOutcome> {
        while let Some(result) = stream.next().await {
            self.record(result);
        }

        let status: DispatchStatus = stream.finish().await?;
        Ok(self.finish(status))
    }

    /// Accounts for one probe result.
    pub fn record(&mut self, result: ProbeResult) {
        let total: usize = self.request.total();
        self.completed += 1;

        if result.open {
            debug!("port {} is open", result.port);
            self.open_ports.push(result.port);
            self.observer.on_open_port(result.port);
        }

        if self.completed % PROGRESS_INTERVAL == 0 || self.completed == total {
            self.observer.on_progress(Progress::new(self.completed, total));
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Sorts the open ports and wraps them in the terminal state.
    pub fn finish(self, status: DispatchStatus) -> ScanOutcome {
        let report = ScanReport::new(self.request.host(), self.request.range(), self.open_ports);

        match status {
            DispatchStatus::Complete => ScanOutcome::Completed(report),
            DispatchStatus::Cancelled => {
                debug!(
                    "scan cancelled after {}/{} ports",
                    self.completed,
                    self.request.total()
                );
                ScanOutcome::Cancelled {
                    report,
                    completed: self.completed,
                }
            }
        }
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
