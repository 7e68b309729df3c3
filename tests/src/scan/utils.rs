#![cfg(test)]
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use portr_common::Result;
use portr_common::network::range::PortRange;
use portr_common::scan::report::ScanOutcome;
use portr_common::scan::request::ScanRequest;
use portr_common::scan::result::{ProbeResult, Progress};
use portr_core::scanner::{self, Prober, ScanObserver};
use tokio_util::sync::CancellationToken;
use tokio::net::TcpListener;

pub const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

pub fn request(start: u16, end: u16, workers: usize) -> ScanRequest {
    request_with_timeout(start, end, workers, Duration::from_millis(500))
}

pub fn request_with_timeout(start: u16, end: u16, workers: usize, timeout: Duration) -> ScanRequest {
    ScanRequest::new(
        "127.0.0.1",
        LOCALHOST,
        PortRange::new(start, end).unwrap(),
        workers,
        timeout,
    )
    .unwrap()
}

/// Validates the raw inputs the way the CLI does, then scans with `prober`.
pub async fn build_and_scan(
    start: u16,
    end: u16,
    workers: usize,
    prober: Arc<dyn Prober>,
) -> Result<ScanOutcome> {
    let range = PortRange::new(start, end)?;
    let request = ScanRequest::new("127.0.0.1", LOCALHOST, range, workers, Duration::from_millis(50))?;
    scanner::scan_with(request, prober, CancellationToken::new(), &mut ()).await
}

/// Answers from a fixed set of open ports. Higher ports answer sooner, so
/// results arrive roughly in reverse port order.
pub struct FakeHost {
    open: HashSet<u16>,
    pub calls: AtomicUsize,
}

impl FakeHost {
    pub fn with_open(open: &[u16]) -> Self {
        Self {
            open: open.iter().copied().collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Prober for FakeHost {
    async fn probe(&self, _addr: IpAddr, port: u16, _timeout: Duration) -> ProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = Duration::from_micros(u64::from(u16::MAX - port) % 500);
        tokio::time::sleep(delay).await;
        ProbeResult {
            port,
            open: self.open.contains(&port),
        }
    }
}

#[derive(Default)]
pub struct Recorder {
    pub progress: Vec<Progress>,
    pub open: Vec<u16>,
}

impl ScanObserver for Recorder {
    fn on_progress(&mut self, progress: Progress) {
        self.progress.push(progress);
    }

    fn on_open_port(&mut self, port: u16) {
        self.open.push(port);
    }
}

/// Binds two listeners on nearby loopback ports.
pub async fn adjacent_listeners() -> (TcpListener, TcpListener) {
    loop {
        let first = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = first.local_addr().unwrap().port();

        for offset in 2..20u16 {
            let Some(candidate) = port.checked_add(offset) else {
                break;
            };
            if let Ok(second) = TcpListener::bind((LOCALHOST, candidate)).await {
                return (first, second);
            }
        }
    }
}
