//! Fan-out of probes across every `(address, port)` target.
//!
//! The orchestrator launches one task per target of the full cross product
//! and funnels every finding into a single [`FindingStream`]. The stream
//! stays open until the last probe task has finished, whatever its outcome.
//!
//! Findings from different probes interleave in any order. Findings from one
//! probe arrive in the order that probe emitted them.

use std::sync::Arc;

use dnsrange_common::config::ScanConfig;
use dnsrange_common::finding::Finding;
use dnsrange_common::network::range::AddressRange;
use dnsrange_common::network::target;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error};

use crate::error::ProbeError;

pub mod probe;
pub mod resolver;

use probe::TargetProbe;

pub type FindingSender = mpsc::UnboundedSender<Finding>;

/// Receiving end of a scan. Closes once every producer is gone.
pub struct FindingStream {
    rx: mpsc::UnboundedReceiver<Finding>,
    driver: Option<JoinHandle<usize>>,
}

impl FindingStream {
    /// A detached stream and its sender, with no scan behind it.
    pub fn channel() -> (FindingSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx, driver: None })
    }

    pub async fn recv(&mut self) -> Option<Finding> {
        self.rx.recv().await
    }

    /// Waits for the scan behind the stream and returns how many probes it ran.
    pub async fn finish(self) -> usize {
        let Some(driver) = self.driver else {
            return 0;
        };
        match driver.await {
            Ok(launched) => launched,
            Err(e) => {
                error!("Scan driver failed: {e}");
                0
            }
        }
    }
}

pub struct ScanOrchestrator {
    probe: Arc<TargetProbe>,
    max_in_flight: Option<usize>,
}

impl ScanOrchestrator {
    pub fn new(config: &ScanConfig, probe: TargetProbe) -> Self {
        Self {
            probe: Arc::new(probe),
            max_in_flight: config.max_in_flight,
        }
    }

    /// Starts probing every `(address, port)` pair. Must be called inside a Tokio runtime.
    pub fn start(&self, range: AddressRange, ports: Vec<String>) -> FindingStream {
        let (tx, mut stream) = FindingStream::channel();
        let limiter = self
            .max_in_flight
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        debug!(
            "Probing {} addresses on {} ports",
            range.len(),
            ports.len()
        );
        let driver = tokio::spawn(launch_probes(
            self.probe.clone(),
            limiter,
            range,
            ports,
            tx,
        ));
        stream.driver = Some(driver);
        stream
    }
}

async fn launch_probes(
    probe: Arc<TargetProbe>,
    limiter: Option<Arc<Semaphore>>,
    range: AddressRange,
    ports: Vec<String>,
    tx: FindingSender,
) -> usize {
    let mut probes = JoinSet::new();

    for target in target::cross_product(&range, &ports) {
        let permit = match &limiter {
            Some(limiter) => match limiter.clone().acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_closed) => break,
            },
            None => None,
        };

        let probe = probe.clone();
        let tx = tx.clone();
        probes.spawn(async move {
            let _permit = permit;
            probe.run(&target, &tx).await;
        });
    }

    // From here on only the probe tasks hold senders; the last one to finish closes the stream.
    drop(tx);

    let launched = probes.len();
    let diagnostics = probe.diagnostics();
    while let Some(joined) = probes.join_next().await {
        if let Err(e) = joined {
            diagnostics.report("probe", &ProbeError::Task(e.to_string()));
        }
    }

    debug!("{launched} probes finished");
    launched
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
