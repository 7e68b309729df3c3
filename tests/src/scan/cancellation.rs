#![cfg(test)]
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use portr_common::scan::report::ScanOutcome;
use portr_common::scan::result::ProbeResult;
use portr_core::scanner::{self, Prober};
use tokio_util::sync::CancellationToken;

use super::utils::{Recorder, request, request_with_timeout};

/// Answers the first `answer` probes at once, cancels the scan on the next
/// one and hangs from then on.
struct CancelAfter {
    answer: usize,
    started: AtomicUsize,
    cancel: CancellationToken,
}

#[async_trait]
impl Prober for CancelAfter {
    async fn probe(&self, _addr: IpAddr, port: u16, _timeout: Duration) -> ProbeResult {
        let n = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.answer {
            return ProbeResult::closed(port);
        }
        self.cancel.cancel();
        std::future::pending().await
    }
}

/// Never answers within a test's lifetime.
struct Blackhole;

#[async_trait]
impl Prober for Blackhole {
    async fn probe(&self, _addr: IpAddr, port: u16, timeout: Duration) -> ProbeResult {
        tokio::time::sleep(timeout).await;
        ProbeResult::closed(port)
    }
}

#[tokio::test]
async fn cancel_after_fifty_ports_yields_partial_report() {
    let cancel = CancellationToken::new();
    let prober = Arc::new(CancelAfter {
        answer: 49,
        started: AtomicUsize::new(0),
        cancel: cancel.clone(),
    });
    let mut recorder = Recorder::default();

    let outcome = scanner::scan_with(request(1, 1000, 10), prober.clone(), cancel, &mut recorder)
        .await
        .unwrap();

    match outcome {
        ScanOutcome::Cancelled { report, completed } => {
            assert!(completed <= 50, "completed {completed} probes");
            assert!(report.open_ports().is_empty());
            assert_eq!(report.range.len(), 1000);
        }
        ScanOutcome::Completed(_) => panic!("cancelled scan reported as complete"),
    }

    // workers already holding a port may start one more probe each
    let started = prober.started.load(Ordering::SeqCst);
    assert!(started <= 50 + 10, "started {started} probes");
    assert!(recorder.progress.iter().all(|p| p.completed < 1000));
}

#[tokio::test]
async fn cancellation_does_not_wait_for_probe_timeouts() {
    let cancel = CancellationToken::new();
    let scan_request = request_with_timeout(1, 100, 4, Duration::from_secs(3600));

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        scanner::scan_with(scan_request, Arc::new(Blackhole), cancel, &mut ()),
    )
    .await
    .expect("scan kept waiting on abandoned probes")
    .unwrap();

    assert!(matches!(outcome, ScanOutcome::Cancelled { completed: 0, .. }));
}

#[tokio::test]
async fn cancelled_before_start_probes_nothing() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let prober = Arc::new(CancelAfter {
        answer: usize::MAX,
        started: AtomicUsize::new(0),
        cancel: cancel.clone(),
    });

    let outcome = scanner::scan_with(request(1, 1000, 10), prober.clone(), cancel, &mut ())
        .await
        .unwrap();

    assert!(outcome.is_cancelled());
    assert_eq!(prober.started.load(Ordering::SeqCst), 0);
}
