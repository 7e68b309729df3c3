use std::io::IsTerminal;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use anyhow::bail;
use colored::*;
use portr_common::config::Config;
use portr_common::network::range::PortRange;
use portr_common::scan::report::{ScanOutcome, ScanReport};
use portr_common::scan::request::{ScanRequest, timeout_from_secs};
use portr_common::scan::result::Progress;
use portr_core::scanner::{self, ScanObserver};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::commands::CommandLine;
use crate::report;
use crate::terminal::{colors, input::InputHandle, print, spinner};

/// Prints scan events as they come in.
struct ConsoleObserver {
    quiet: u8,
}

impl ScanObserver for ConsoleObserver {
    fn on_progress(&mut self, progress: Progress) {
        spinner::report_scan_progress(&progress);
    }

    fn on_open_port(&mut self, port: u16) {
        if self.quiet == 0 {
            let port: ColoredString = port.to_string().color(colors::PORT).bold();
            print::print_status(format!("Discovered open port {port}"));
        }
    }
}

pub async fn scan(args: &CommandLine, cfg: &Config) -> anyhow::Result<ScanOutcome> {
    let cancel = CancellationToken::new();
    // Releases the interrupt listener on every return path.
    let _release = cancel.clone().drop_guard();
    spawn_interrupt_listener(cancel.clone());

    let request: ScanRequest = build_request_until_cancelled(args, &cancel).await?;
    print_request(&request, cfg);

    let input: Option<InputHandle> = start_input(cfg, cancel.clone());

    spinner::start_spinner(input.is_some());

    let start_time: Instant = Instant::now();
    let mut observer = ConsoleObserver { quiet: cfg.quiet };
    let result = scanner::perform_scan(request, cancel.clone(), &mut observer).await;

    spinner::finish_spinner();
    if let Some(input) = input {
        input.stop();
    }

    let outcome: ScanOutcome = result?;
    report::write_report(&cfg.output, &outcome)?;
    scan_ends(&outcome, start_time.elapsed(), cfg);

    Ok(outcome)
}

/// Gives up on a slow name lookup once the user interrupts.
async fn build_request_until_cancelled(
    args: &CommandLine,
    cancel: &CancellationToken,
) -> anyhow::Result<ScanRequest> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => bail!("interrupted before the scan started"),
        request = build_request(args) => request,
    }
}

/// Validates the arguments and resolves the target before any probe runs.
async fn build_request(args: &CommandLine) -> anyhow::Result<ScanRequest> {
    let range: PortRange = PortRange::new(args.start_port, args.end_port)?;
    let timeout: Duration = timeout_from_secs(args.timeout)?;
    let addr: IpAddr = args.target.resolve().await?;

    Ok(ScanRequest::new(
        args.target.to_string(),
        addr,
        range,
        args.workers,
        timeout,
    )?)
}

fn print_request(request: &ScanRequest, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let mut rows: Vec<(&str, String)> = vec![("Target", request.host().to_string())];
    if request.host() != request.addr().to_string() {
        rows.push(("Address", request.addr().to_string()));
    }
    rows.push((
        "Ports",
        format!("{} ({} total)", request.range(), request.total()),
    ));
    rows.push(("Workers", request.workers().to_string()));
    rows.push(("Timeout", format!("{:.2}s", request.timeout().as_secs_f64())));

    print::header("starting scan", cfg.quiet);
    print::key_value_block(&rows);
}

fn spawn_interrupt_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if res.is_ok() {
                    warn!("Received interrupt, finishing early...");
                    cancel.cancel();
                }
            }
            _ = cancel.cancelled() => {}
        }
    });
}

fn start_input(cfg: &Config, cancel: CancellationToken) -> Option<InputHandle> {
    if cfg.disable_input || !std::io::stdin().is_terminal() {
        return None;
    }

    match InputHandle::start(cancel) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Key listener unavailable: {e}");
            None
        }
    }
}

fn scan_ends(outcome: &ScanOutcome, total_time: Duration, cfg: &Config) {
    let report: &ScanReport = outcome.report();

    if let ScanOutcome::Cancelled { completed, .. } = outcome {
        warn!(
            "Scan interrupted after {completed}/{} ports, the report is incomplete",
            report.range.len()
        );
    }

    if cfg.quiet < 2 {
        print_open_ports(report, cfg);
    }

    print_summary(outcome, total_time, cfg);
}

fn print_open_ports(report: &ScanReport, cfg: &Config) {
    if report.has_open_ports() {
        print::header("open ports", cfg.quiet);
        print::print_status(format!(
            "Open ports on {}: {}",
            report.host,
            report.joined_ports().color(colors::PORT)
        ));
    } else {
        print::header("zero open ports", cfg.quiet);
        print::print_status(format!(
            "No open ports found on {} in {}",
            report.host, report.range
        ));
    }
}

fn print_summary(outcome: &ScanOutcome, total_time: Duration, cfg: &Config) {
    let open_count: usize = outcome.report().open_ports().len();
    let noun: &str = if open_count == 1 { "open port" } else { "open ports" };
    let open_ports: ColoredString = format!("{open_count} {noun}").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let verb: &str = if outcome.is_cancelled() {
        "Scan Interrupted"
    } else {
        "Scan Complete"
    };
    let output: String = format!("{verb}: {open_ports} found in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::separator();
            print::centerln(&output);
        }
        _ => print::print_status(output),
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
