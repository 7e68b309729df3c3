use std::path::PathBuf;

/// Default location of the report file.
pub const DEFAULT_OUTPUT: &str = "open_ports.txt";

/// Presentation settings for the front-end.
///
/// Everything that influences *what* gets scanned lives on
/// [`ScanRequest`](crate::scan::request::ScanRequest) instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hides the banner printed on startup.
    pub no_banner: bool,
    /// 0 prints everything, 1 drops per-port chatter, 2 prints the summary only.
    pub quiet: u8,
    /// Do not listen for the `q` key while scanning.
    ///
    /// Ctrl-C still cancels the scan.
    pub disable_input: bool,
    /// Where the report file is written.
    pub output: PathBuf,
}
