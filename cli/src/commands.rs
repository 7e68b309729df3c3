pub mod scan;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use portr_common::config::{Config, DEFAULT_OUTPUT};
use portr_common::network::target::Target;
use portr_common::scan::request::{DEFAULT_END_PORT, DEFAULT_START_PORT, DEFAULT_WORKERS};

#[derive(Parser, Debug)]
#[command(name = "portr", version)]
#[command(about = "A concurrent TCP port scanner.")]
pub struct CommandLine {
    /// Host name or IP address to scan
    pub target: Target,

    /// First port of the range
    #[arg(short, long, default_value_t = DEFAULT_START_PORT)]
    pub start_port: u16,

    /// Last port of the range, inclusive
    #[arg(short, long, default_value_t = DEFAULT_END_PORT)]
    pub end_port: u16,

    /// Maximum number of connection attempts in flight
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-port connection timeout in seconds
    #[arg(short, long, default_value_t = 0.5)]
    pub timeout: f64,

    /// File the report is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Reduce output; repeat for less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,

    /// Do not listen for the 'q' key
    #[arg(long)]
    pub disable_input: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            disable_input: self.disable_input,
            output: self.output.clone(),
        }
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
