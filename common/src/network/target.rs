//! # Scan Target Model
//!
//! The host a scan is aimed at. This can be:
//! * An IPv4 or IPv6 address literal (e.g., `192.168.1.5`, `::1`).
//! * A DNS name (e.g., `scanme.example.org`), resolved once before the scan.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use tokio::net::lookup_host;
use tracing::debug;

use crate::error::{Result, ScanError};

/// Represents the host to be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// An address given literally on the command line.
    Host { target_addr: IpAddr },
    /// A name that still needs resolving.
    Name { hostname: String },
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(target) = parse_host(s) {
            return Ok(target);
        }

        if let Some(target) = parse_hostname(s) {
            return Ok(target);
        }

        Err(format!("invalid target: {s}"))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Host { target_addr } => write!(f, "{target_addr}"),
            Target::Name { hostname } => write!(f, "{hostname}"),
        }
    }
}

impl Target {
    /// Resolves the target to a single address.
    ///
    /// Names are looked up once; the first address returned wins.
    pub async fn resolve(&self) -> Result<IpAddr> {
        let hostname = match self {
            Target::Host { target_addr } => return Ok(*target_addr),
            Target::Name { hostname } => hostname,
        };

        let mut addrs = lookup_host((hostname.as_str(), 0))
            .await
            .map_err(|e| ScanError::Resolve {
                target: hostname.clone(),
                reason: e.to_string(),
            })?;

        let addr = addrs.next().ok_or_else(|| ScanError::Resolve {
            target: hostname.clone(),
            reason: "no addresses returned".to_string(),
        })?;

        debug!("resolved {hostname} to {}", addr.ip());
        Ok(addr.ip())
    }
}

/// Parses a single IP address.
fn parse_host(s: &str) -> Option<Target> {
    s.parse::<IpAddr>()
        .ok()
        .map(|target_addr| Target::Host { target_addr })
}

/// Accepts anything that looks like a DNS name: dot-separated labels of
/// alphanumerics and hyphens, no label starting or ending with a hyphen.
fn parse_hostname(s: &str) -> Option<Target> {
    if s.is_empty() || s.len() > 253 {
        return None;
    }

    let valid = s.trim_end_matches('.').split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    // All-numeric names are malformed addresses like "10.0.0.256", not hosts.
    let all_numeric = s.chars().all(|c| c.is_ascii_digit() || c == '.');

    (valid && !all_numeric).then(|| Target::Name {
        hostname: s.to_string(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
