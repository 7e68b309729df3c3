//! Writes the scan report to disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use portr_common::scan::report::ScanOutcome;
use tracing::info;

pub fn render(outcome: &ScanOutcome) -> String {
    let report = outcome.report();
    let mut contents: String = report.to_string();

    if let ScanOutcome::Cancelled { completed, .. } = outcome {
        contents.push_str(&format!(
            "Status: cancelled after {completed}/{} ports\n",
            report.range.len()
        ));
    }

    contents
}

pub fn write_report(path: &Path, outcome: &ScanOutcome) -> anyhow::Result<()> {
    fs::write(path, render(outcome))
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
