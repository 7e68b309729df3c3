mod commands;
mod report;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, scan};
use portr_common::ScanError;
use portr_common::config::Config;
use terminal::{logging, print};
use tracing::error;

const EXIT_CANCELLED: u8 = 1;
const EXIT_ERROR: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    if let Err(e) = logging::init_logging() {
        eprintln!("failed to initialize logging: {e}");
    }

    let cfg: Config = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    let code = match scan::scan(&commands, &cfg).await {
        Ok(outcome) if outcome.is_cancelled() => ExitCode::from(EXIT_CANCELLED),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    };

    if cfg.quiet == 0 {
        print::separator();
    }
    code
}

fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<ScanError>() {
        Some(scan_err) if scan_err.is_validation() => error!("Invalid scan request: {scan_err}"),
        _ => error!("Scan failed: {e:#}"),
    }
}
