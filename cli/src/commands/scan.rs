use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use dnsrange_common::network::target::parse_ports;
use dnsrange_core::aggregator::{FindingSink, ResultAggregator};
use dnsrange_core::output::{CsvSink, TextSink};
use dnsrange_core::scanner::ScanOrchestrator;
use dnsrange_core::scanner::probe::TargetProbe;
use tracing::debug;

use super::{CommandLine, OutputFormat};

pub async fn scan(cmd: &CommandLine) -> anyhow::Result<()> {
    let cfg = cmd.scan_config();
    let mut sink = open_sink(cmd.output.as_deref(), cmd.format)?;

    let probe = TargetProbe::new(&cfg).context("failed to prepare TLS probe")?;
    let orchestrator = ScanOrchestrator::new(&cfg, probe);
    let stream = orchestrator.start(cmd.range, parse_ports(&cmd.ports));

    let summary = ResultAggregator::new()
        .drain(stream, &mut sink)
        .await
        .context("failed to write results")?;

    debug!("{} unique names from {} probes", summary.written, summary.probes);
    Ok(())
}

fn open_sink(path: Option<&Path>, format: OutputFormat) -> anyhow::Result<Box<dyn FindingSink>> {
    let out: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("unable to open output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Txt => Box::new(TextSink::new(out)),
        OutputFormat::Csv => Box::new(CsvSink::new(out)),
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
