//! A single `(address, port)` probe.
//!
//! The probe connects, attempts a TLS handshake that accepts any
//! certificate, emits the names found in the presented certificates and then
//! emits the reverse-DNS names of the address. Nothing is returned to the
//! caller: findings go to the stream, failures to the [`DiagnosticSink`].
//!
//! Order of emissions for one probe is fixed: certificate names (CN then
//! SANs, certificate by certificate), then reverse-DNS names.

use std::sync::Arc;
use std::time::Duration;

use dnsrange_common::config::ScanConfig;
use dnsrange_common::finding::Finding;
use dnsrange_common::network::target::Target;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tracing::trace;

use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
use crate::error::{ProbeError, ScanError};
use crate::network::{tcp, tls};
use crate::scanner::FindingSender;
use crate::scanner::resolver::{DisabledResolver, ReverseResolver, SystemResolver};

pub struct TargetProbe {
    connector: TlsConnector,
    resolver: Arc<dyn ReverseResolver>,
    diagnostics: Arc<dyn DiagnosticSink>,
    connect_timeout: Duration,
}

impl TargetProbe {
    /// Probe wired to the system resolver and `tracing` diagnostics.
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let resolver: Arc<dyn ReverseResolver> = if config.no_dns {
            Arc::new(DisabledResolver)
        } else {
            Arc::new(SystemResolver::default())
        };

        Ok(Self {
            connector: tls::insecure_connector()?,
            resolver,
            diagnostics: Arc::new(TracingDiagnostics::new(config.verbose)),
            connect_timeout: config.connect_timeout,
        })
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ReverseResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn diagnostics(&self) -> Arc<dyn DiagnosticSink> {
        self.diagnostics.clone()
    }

    /// Probes one target, sending every finding to `findings`.
    ///
    /// A connect failure ends the probe. A handshake failure only skips the
    /// certificate step; the reverse lookup still runs.
    pub async fn run(&self, target: &Target, findings: &FindingSender) {
        let endpoint = target.endpoint();

        let stream = match tcp::connect(&endpoint, self.connect_timeout).await {
            Ok(stream) => stream,
            Err(e) => {
                self.diagnostics.report(&endpoint, &e);
                return;
            }
        };

        match tls::handshake(&self.connector, target.addr, stream).await {
            Ok(session) => self.emit_certificate_names(target, &endpoint, &session, findings),
            Err(e) => self.diagnostics.report(&endpoint, &e),
        }

        self.emit_reverse_names(target, findings).await;
    }

    fn emit_certificate_names(
        &self,
        target: &Target,
        endpoint: &str,
        session: &TlsStream<TcpStream>,
        findings: &FindingSender,
    ) {
        let address = target.addr.to_string();

        for identity in tls::peer_identities(session) {
            let identity = match identity {
                Ok(identity) => identity,
                Err(e) => {
                    self.diagnostics.report(endpoint, &ProbeError::from(e));
                    continue;
                }
            };
            for name in identity.names() {
                trace!("{endpoint} presents {name}");
                // The receiver only goes away when the run is aborting.
                let _ = findings.send(Finding::certificate(address.as_str(), name));
            }
        }
    }

    async fn emit_reverse_names(&self, target: &Target, findings: &FindingSender) {
        let address = target.addr.to_string();

        match self.resolver.reverse(target.addr).await {
            Ok(names) => {
                for name in names {
                    let _ = findings.send(Finding::reverse_dns(address.as_str(), name));
                }
            }
            Err(e) => self.diagnostics.report(&address, &ProbeError::ReverseDns(e)),
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
