//! Deduplication of the finding stream.
//!
//! The aggregator is the only consumer of a scan. It remembers every
//! `(address, name)` pair it has forwarded and drops later findings with the
//! same pair, whichever source they come from. The first finding wins.

use std::collections::HashSet;
use std::io;

use dnsrange_common::finding::Finding;
use tracing::debug;

use crate::error::ScanError;
use crate::scanner::FindingStream;

/// Destination for deduplicated findings.
pub trait FindingSink {
    fn write(&mut self, finding: &Finding) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FindingSink for Vec<Finding> {
    fn write(&mut self, finding: &Finding) -> io::Result<()> {
        self.push(finding.clone());
        Ok(())
    }
}

impl<S: FindingSink + ?Sized> FindingSink for Box<S> {
    fn write(&mut self, finding: &Finding) -> io::Result<()> {
        (**self).write(finding)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub received: usize,
    pub written: usize,
    pub probes: usize,
}

#[derive(Debug, Default)]
pub struct ResultAggregator {
    seen: HashSet<(String, String)>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a given `(address, name)` pair is offered.
    pub fn admit(&mut self, finding: &Finding) -> bool {
        let (address, name) = finding.key();
        self.seen.insert((address.to_owned(), name.to_owned()))
    }

    pub fn distinct(&self) -> usize {
        self.seen.len()
    }

    /// Forwards every new finding to `sink` in arrival order until the stream closes.
    ///
    /// A sink error stops the drain and is returned; the remaining probes
    /// keep running but their findings are discarded.
    pub async fn drain<S>(
        &mut self,
        mut stream: FindingStream,
        sink: &mut S,
    ) -> Result<Summary, ScanError>
    where
        S: FindingSink + ?Sized,
    {
        let mut summary = Summary::default();

        while let Some(finding) = stream.recv().await {
            summary.received += 1;
            if !self.admit(&finding) {
                continue;
            }
            sink.write(&finding)?;
            summary.written += 1;
        }

        sink.finish()?;
        summary.probes = stream.finish().await;
        debug!(
            "{} findings received, {} written, {} probes",
            summary.received, summary.written, summary.probes
        );
        Ok(summary)
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
