use std::io::{self, ErrorKind};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use portr_common::scan::result::ProbeResult;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{trace, warn};

use crate::scanner::Prober;

/// Full TCP handshake probe.
///
/// A port is open when the handshake completes before the timeout. The stream
/// is dropped right away, so no data is ever sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, addr: IpAddr, port: u16, probe_timeout: Duration) -> ProbeResult {
        handshake_probe(SocketAddr::new(addr, port), probe_timeout).await
    }
}

pub async fn handshake_probe(socket_addr: SocketAddr, probe_timeout: Duration) -> ProbeResult {
    let port: u16 = socket_addr.port();

    match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(_stream)) => ProbeResult::open(port),
        Ok(Err(e)) => {
            if is_expected_failure(&e) {
                trace!("port {port} closed: {e}");
            } else {
                warn!("probe of port {port} failed: {e}");
            }
            ProbeResult::closed(port)
        }
        Err(_elapsed) => {
            trace!("port {port} timed out");
            ProbeResult::closed(port)
        }
    }
}

/// Errors that just mean "nobody is listening there".
fn is_expected_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::TimedOut
            | ErrorKind::HostUnreachable
            | ErrorKind::NetworkUnreachable
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
