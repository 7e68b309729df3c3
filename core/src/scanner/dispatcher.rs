use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use portr_common::network::range::PortRange;
use portr_common::scan::{request::ScanRequest, result::ProbeResult};
use portr_common::{Result, ScanError};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::Prober;

/// How the result stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// A result was delivered for every port of the range.
    Complete,
    /// Dispatch stopped early; some ports have no result.
    Cancelled,
}

/// Fans probes out over a bounded pool of workers.
pub struct Dispatcher {
    prober: Arc<dyn Prober>,
    cancel: CancellationToken,
}

/// Results in completion order, plus the handle that tells how dispatch ended.
pub struct ResultStream {
    rx: mpsc::Receiver<ProbeResult>,
    supervisor: JoinHandle<Result<DispatchStatus>>,
    total: usize,
}

/// Hands out the ports of a range in ascending order, each exactly once.
struct PortQueue {
    next: AtomicU32,
    end: u32,
}

impl PortQueue {
    fn new(range: PortRange) -> Self {
        Self {
            next: AtomicU32::new(u32::from(range.start())),
            end: u32::from(range.end()),
        }
    }

    fn next_port(&self) -> Option<u16> {
        let port: u32 = self.next.fetch_add(1, Ordering::Relaxed);
        if port > self.end {
            return None;
        }
        u16::try_from(port).ok()
    }
}

/// Everything a worker needs, shared by all workers of one dispatch.
struct WorkerContext {
    prober: Arc<dyn Prober>,
    request: Arc<ScanRequest>,
    queue: PortQueue,
    delivered: AtomicUsize,
    cancel: CancellationToken,
}

impl Dispatcher {
    pub fn new(prober: Arc<dyn Prober>, cancel: CancellationToken) -> Self {
        Self { prober, cancel }
    }

    /// Starts probing every port of the request's range.
    ///
    /// At most `request.workers()` probes are in flight at any time. Must be
    /// called from within a tokio runtime.
    pub fn dispatch(&self, request: Arc<ScanRequest>) -> ResultStream {
        let total: usize = request.total();
        let worker_count: usize = request.workers().min(total);
        let (tx, rx) = mpsc::channel::<ProbeResult>(worker_count);

        let ctx = Arc::new(WorkerContext {
            prober: self.prober.clone(),
            queue: PortQueue::new(request.range()),
            request,
            delivered: AtomicUsize::new(0),
            cancel: self.cancel.child_token(),
        });

        let supervisor = tokio::spawn(supervise(ctx, worker_count, tx));

        ResultStream {
            rx,
            supervisor,
            total,
        }
    }
}

async fn supervise(
    ctx: Arc<WorkerContext>,
    worker_count: usize,
    tx: mpsc::Sender<ProbeResult>,
) -> Result<DispatchStatus> {
    let mut workers: JoinSet<()> = JoinSet::new();
    for _ in 0..worker_count {
        workers.spawn(run_worker(ctx.clone(), tx.clone()));
    }
    drop(tx);

    debug!("dispatched {worker_count} workers");

    let mut failure: Option<String> = None;
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            error!("scan worker died: {e}");
            ctx.cancel.cancel();
            failure.get_or_insert_with(|| e.to_string());
        }
    }

    if let Some(reason) = failure {
        return Err(ScanError::Worker(reason));
    }

    let delivered: usize = ctx.delivered.load(Ordering::Acquire);
    if delivered == ctx.request.total() {
        Ok(DispatchStatus::Complete)
    } else {
        debug!("dispatch stopped after {delivered} results");
        Ok(DispatchStatus::Cancelled)
    }
}

async fn run_worker(ctx: Arc<WorkerContext>, tx: mpsc::Sender<ProbeResult>) {
    let addr: IpAddr = ctx.request.addr();

    while !ctx.cancel.is_cancelled() {
        let Some(port) = ctx.queue.next_port() else {
            break;
        };

        let result: ProbeResult = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            result = ctx.prober.probe(addr, port, ctx.request.timeout()) => result,
        };

        tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            sent = tx.send(result) => {
                if sent.is_err() {
                    break;
                }
            }
        }

        ctx.delivered.fetch_add(1, Ordering::AcqRel);
    }
}

impl ResultStream {
    /// Next result in completion order; `None` once all workers are done.
    pub async fn next(&mut self) -> Option<ProbeResult> {
        self.rx.recv().await
    }

    /// Number of results a complete stream yields.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Waits for dispatch to end and reports how it ended.
    ///
    /// Calling this before the stream is drained stops the remaining workers,
    /// and the dispatch counts as cancelled.
    pub async fn finish(self) -> Result<DispatchStatus> {
        let Self { rx, supervisor, .. } = self;
        drop(rx);

        supervisor
            .await
            .map_err(|e| ScanError::Worker(e.to_string()))?
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
