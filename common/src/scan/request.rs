use std::net::IpAddr;
use std::time::Duration;

use crate::error::{Result, ScanError};
use crate::network::range::PortRange;

pub const DEFAULT_START_PORT: u16 = 1;
pub const DEFAULT_END_PORT: u16 = 1000;
pub const DEFAULT_WORKERS: usize = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// A validated description of one scan.
///
/// Can only be obtained through [`ScanRequest::new`], so every value in
/// circulation already satisfies `start <= end`, `workers >= 1` and
/// `timeout > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    host: String,
    addr: IpAddr,
    range: PortRange,
    workers: usize,
    timeout: Duration,
}

impl ScanRequest {
    pub fn new(
        host: impl Into<String>,
        addr: IpAddr,
        range: PortRange,
        workers: usize,
        timeout: Duration,
    ) -> Result<Self> {
        range.check()?;
        if workers == 0 {
            return Err(ScanError::NoWorkers);
        }
        if timeout.is_zero() {
            return Err(ScanError::InvalidTimeout("timeout must be greater than zero".into()));
        }

        Ok(Self {
            host: host.into(),
            addr,
            range,
            workers,
            timeout,
        })
    }

    /// The target as the user wrote it.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The address every probe connects to.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn range(&self) -> PortRange {
        self.range
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of probes a complete scan performs.
    pub fn total(&self) -> usize {
        self.range.len()
    }
}

/// Converts a timeout given in (fractional) seconds.
pub fn timeout_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ScanError::InvalidTimeout(format!(
            "{secs} is not a positive number of seconds"
        )));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| ScanError::InvalidTimeout(e.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn localhost() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    #[test]
    fn new_accepts_defaults() {
        let range = PortRange::new(DEFAULT_START_PORT, DEFAULT_END_PORT).unwrap();
        let request =
            ScanRequest::new("localhost", localhost(), range, DEFAULT_WORKERS, DEFAULT_TIMEOUT)
                .unwrap();

        assert_eq!(request.host(), "localhost");
        assert_eq!(request.total(), 1000);
        assert_eq!(request.workers(), 100);
        assert_eq!(request.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn new_rejects_zero_workers() {
        let range = PortRange::new(1, 10).unwrap();
        let result = ScanRequest::new("127.0.0.1", localhost(), range, 0, DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(ScanError::NoWorkers)));
    }

    #[test]
    fn new_rechecks_the_range() {
        let reversed = PortRange {
            start_port: 100,
            end_port: 1,
        };
        let result = ScanRequest::new("127.0.0.1", localhost(), reversed, 10, DEFAULT_TIMEOUT);
        assert!(matches!(
            result,
            Err(ScanError::InvalidRange { start: 100, end: 1 })
        ));

        let zero = PortRange {
            start_port: 0,
            end_port: 10,
        };
        let result = ScanRequest::new("127.0.0.1", localhost(), zero, 10, DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(ScanError::ZeroPort)));
    }

    #[test]
    fn new_rejects_zero_timeout() {
        let range = PortRange::new(1, 10).unwrap();
        let result = ScanRequest::new("127.0.0.1", localhost(), range, 1, Duration::ZERO);
        assert!(matches!(result, Err(ScanError::InvalidTimeout(_))));
    }

    #[test]
    fn timeout_from_secs_parsing() {
        assert_eq!(timeout_from_secs(0.5).unwrap(), Duration::from_millis(500));
        assert_eq!(timeout_from_secs(2.0).unwrap(), Duration::from_secs(2));

        assert!(timeout_from_secs(0.0).is_err());
        assert!(timeout_from_secs(-1.0).is_err());
        assert!(timeout_from_secs(f64::NAN).is_err());
        assert!(timeout_from_secs(f64::INFINITY).is_err());
    }
}
