use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings fixed at startup and shared, read-only, by the orchestrator and every probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Hard cutoff for the TCP connect. The TLS handshake and the
    /// reverse lookup are not bounded by it.
    pub connect_timeout: Duration,
    /// Report per-target failures (connect, handshake, rDNS).
    pub verbose: bool,
    /// Upper bound on probes in flight. `None` launches every target at once.
    pub max_in_flight: Option<usize>,
    /// Disables reverse (PTR) lookups.
    ///
    /// Certificate names are still collected.
    pub no_dns: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            verbose: false,
            max_in_flight: None,
            no_dns: false,
        }
    }
}

impl ScanConfig {
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout = Duration::from_secs(secs);
        self
    }
}
