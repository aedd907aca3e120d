use std::fmt;
use std::io;
use std::time::Duration;

use dnsrange_protocols::tls::CertificateError;
use thiserror::Error;

/// The step of a probe that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Connect,
    Handshake,
    Certificate,
    ReverseDns,
    Task,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Connect => "connect",
            Stage::Handshake => "handshake",
            Stage::Certificate => "certificate",
            Stage::ReverseDns => "rDNS lookup",
            Stage::Task => "probe task",
        };
        f.write_str(label)
    }
}

/// A per-target failure. Never fatal for the run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0}")]
    Connect(#[source] io::Error),

    #[error("timed out after {}s", .0.as_secs_f64())]
    ConnectTimeout(Duration),

    #[error("{0}")]
    Handshake(#[source] io::Error),

    #[error(transparent)]
    Certificate(#[from] CertificateError),

    #[error("{0}")]
    ReverseDns(#[source] io::Error),

    #[error("{0}")]
    Task(String),
}

impl ProbeError {
    pub fn stage(&self) -> Stage {
        match self {
            ProbeError::Connect(_) | ProbeError::ConnectTimeout(_) => Stage::Connect,
            ProbeError::Handshake(_) => Stage::Handshake,
            ProbeError::Certificate(_) => Stage::Certificate,
            ProbeError::ReverseDns(_) => Stage::ReverseDns,
            ProbeError::Task(_) => Stage::Task,
        }
    }
}

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to build TLS client configuration: {0}")]
    TlsConfig(#[from] rustls::Error),

    #[error("failed to write finding: {0}")]
    Sink(#[from] io::Error),
}
