//! The central **abstraction** for port scanning.
//!
//! A scan is split in three parts:
//! 1. a [`Prober`] performs a single connection attempt,
//! 2. the [`Dispatcher`] runs probes over the whole range on a bounded pool of workers,
//! 3. the [`Aggregator`] consumes the results and builds the [`ScanOutcome`].
//!
//! High-level callers should go through [`perform_scan`] rather than wiring the
//! parts together by hand.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use portr_common::scan::{report::ScanOutcome, request::ScanRequest, result::ProbeResult};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span};

use crate::network::tcp::TcpProber;

mod aggregator;
mod dispatcher;

pub use aggregator::{Aggregator, PROGRESS_INTERVAL, ScanObserver};
pub use dispatcher::{DispatchStatus, Dispatcher, ResultStream};

/// Defines the strategy for probing a single transport-layer port.
///
/// Implementations must never fail: any problem reaching the port is reported
/// as a closed port.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: IpAddr, port: u16, timeout: Duration) -> ProbeResult;
}

/// Executes a TCP connect scan as described by `request`.
pub async fn perform_scan<O>(
    request: ScanRequest,
    cancel: CancellationToken,
    observer: &mut O,
) -> portr_common::Result<ScanOutcome>
where
    O: ScanObserver,
{
    scan_with(request, Arc::new(TcpProber), cancel, observer).await
}

/// Executes a scan with a caller supplied prober.
pub async fn scan_with<O>(
    request: ScanRequest,
    prober: Arc<dyn Prober>,
    cancel: CancellationToken,
    observer: &mut O,
) -> portr_common::Result<ScanOutcome>
where
    O: ScanObserver,
{
    let span = info_span!(
        "scan",
        host = %request.host(),
        range = %request.range(),
        workers = request.workers()
    );

    let request: Arc<ScanRequest> = Arc::new(request);
    let stream: ResultStream = Dispatcher::new(prober, cancel).dispatch(request.clone());

    Aggregator::new(&request, observer)
        .consume(stream)
        .instrument(span)
        .await
}
