#![cfg(test)]
use std::sync::Arc;
use std::sync::atomic::Ordering;

use portr_common::ScanError;
use portr_common::scan::report::ScanOutcome;
use portr_core::scanner;
use tokio_util::sync::CancellationToken;

use super::utils::{FakeHost, LOCALHOST, Recorder, adjacent_listeners, build_and_scan, request};

/// Scans real loopback listeners with the TCP prober.
#[tokio::test]
async fn scan_finds_loopback_listeners() {
    let (first, second) = adjacent_listeners().await;
    let first_port = first.local_addr().unwrap().port();
    let second_port = second.local_addr().unwrap().port();
    let end = second_port.saturating_add(3);

    let mut recorder = Recorder::default();
    let outcome = scanner::perform_scan(
        request(first_port, end, 8),
        CancellationToken::new(),
        &mut recorder,
    )
    .await
    .unwrap();

    let ScanOutcome::Completed(report) = outcome else {
        panic!("scan did not complete");
    };

    let open = report.open_ports();
    assert!(open.contains(&first_port));
    assert!(open.contains(&second_port));
    assert!(open.iter().all(|p| (first_port..=end).contains(p)));
    assert!(open.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn scan_reports_freed_port_closed() {
    let listener = tokio::net::TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let outcome = scanner::perform_scan(request(port, port, 1), CancellationToken::new(), &mut ())
        .await
        .unwrap();

    assert!(!outcome.is_cancelled());
    assert!(!outcome.report().has_open_ports());
}

#[tokio::test]
async fn open_ports_come_out_sorted() {
    let host = Arc::new(FakeHost::with_open(&[80, 22]));
    let mut recorder = Recorder::default();

    let outcome = scanner::scan_with(
        request(1, 100, 10),
        host.clone(),
        CancellationToken::new(),
        &mut recorder,
    )
    .await
    .unwrap();

    assert_eq!(outcome.report().open_ports(), &[22, 80]);
    assert_eq!(host.calls.load(Ordering::SeqCst), 100);
    recorder.open.sort_unstable();
    assert_eq!(recorder.open, vec![22, 80]);
}

#[tokio::test]
async fn nothing_open_reports_none() {
    let host = Arc::new(FakeHost::with_open(&[]));
    let outcome = scanner::scan_with(request(1, 10, 3), host, CancellationToken::new(), &mut ())
        .await
        .unwrap();

    let ScanOutcome::Completed(report) = outcome else {
        panic!("scan did not complete");
    };
    assert!(report.open_ports().is_empty());
    assert_eq!(report.joined_ports(), "none");
    assert!(report.to_string().contains("Open ports: none"));
}

#[tokio::test]
async fn progress_is_monotonic_and_bounded() {
    let host = Arc::new(FakeHost::with_open(&[7, 512, 999]));
    let mut recorder = Recorder::default();

    scanner::scan_with(request(1, 1000, 64), host, CancellationToken::new(), &mut recorder)
        .await
        .unwrap();

    let progress = recorder.progress;
    let counts: Vec<usize> = progress.iter().map(|p| p.completed).collect();
    assert_eq!(counts, (1..=10).map(|n| n * 100).collect::<Vec<_>>());
    assert!(progress.iter().all(|p| p.completed <= p.total));
    assert_eq!(progress.last().unwrap().percentage, 100.0);
}

#[tokio::test]
async fn invalid_requests_never_reach_the_prober() {
    let host = Arc::new(FakeHost::with_open(&[]));

    let reversed = build_and_scan(100, 1, 10, host.clone()).await;
    assert!(matches!(
        reversed,
        Err(ScanError::InvalidRange { start: 100, end: 1 })
    ));

    let no_workers = build_and_scan(1, 10, 0, host.clone()).await;
    assert!(matches!(no_workers, Err(ScanError::NoWorkers)));
    assert_eq!(host.calls.load(Ordering::SeqCst), 0);

    let valid = build_and_scan(1, 10, 2, host.clone()).await;
    assert!(matches!(valid, Ok(ScanOutcome::Completed(_))));
    assert_eq!(host.calls.load(Ordering::SeqCst), 10);
}
