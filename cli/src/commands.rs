pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dnsrange_common::config::ScanConfig;
use dnsrange_common::network::range::AddressRange;

#[derive(Parser, Debug)]
#[command(name = "dnsrange")]
#[command(about = "Enumerate the DNS names bound to a range of addresses.")]
pub struct CommandLine {
    /// Addresses to probe: `start-end` (e.g. 192.0.2.1-192.0.2.9) or CIDR (e.g. 192.0.2.0/24)
    pub range: AddressRange,

    /// Comma-separated list of ports (e.g. 443,8443)
    pub ports: String,

    /// Display errors
    #[arg(short, long)]
    pub verbose: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Txt)]
    pub format: OutputFormat,

    /// Socket timeout in seconds
    #[arg(short, long, value_name = "SECONDS", default_value_t = 5)]
    pub timeout: u64,

    /// Maximum probes in flight (default: unbounded)
    #[arg(short, long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Skip reverse DNS lookups
    #[arg(long)]
    pub no_dns: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `address:name` lines
    Txt,
    /// `address,name,source` rows
    Csv,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            connect_timeout: Duration::from_secs(self.timeout),
            verbose: self.verbose,
            max_in_flight: self.concurrency,
            no_dns: self.no_dns,
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
