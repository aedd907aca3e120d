//! Reporting of per-target failures.
//!
//! Probes never surface errors to their caller. They hand each failure to a
//! [`DiagnosticSink`] injected at construction, which decides whether and
//! where it is shown.

use std::sync::Mutex;

use tracing::warn;

use crate::error::{ProbeError, Stage};

pub trait DiagnosticSink: Send + Sync {
    /// `target` is the endpoint (`address:port`) or, for reverse lookups, the bare address.
    fn report(&self, target: &str, error: &ProbeError);
}

/// Forwards failures to `tracing`, only when verbose output was requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics {
    verbose: bool,
}

impl TracingDiagnostics {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, target: &str, error: &ProbeError) {
        if !self.verbose {
            return;
        }
        warn!("Error: {} {target}: {error}", error.stage());
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    reports: Mutex<Vec<(String, Stage)>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, Stage)> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.reports().into_iter().map(|(_, stage)| stage).collect()
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn report(&self, target: &str, error: &ProbeError) {
        let mut reports = match self.reports.lock() {
            Ok(reports) => reports,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.push((target.to_string(), error.stage()));
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
