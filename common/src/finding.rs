use std::fmt;

/// Where a name was learned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Subject CN or a DNS SAN entry of a presented certificate.
    CertificateIdentity,
    /// A PTR record for the probed address.
    ReverseDns,
}

impl Source {
    /// Label written in the CSV `source` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::CertificateIdentity => "SSL",
            Source::ReverseDns => "rDNS",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (address, name, source) association discovered by a probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Finding {
    pub address: String,
    pub name: String,
    pub source: Source,
}

impl Finding {
    pub fn new(address: impl Into<String>, name: impl Into<String>, source: Source) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            source,
        }
    }

    pub fn certificate(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(address, name, Source::CertificateIdentity)
    }

    pub fn reverse_dns(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(address, name, Source::ReverseDns)
    }

    /// Deduplication key. The source is deliberately left out.
    pub fn key(&self) -> (&str, &str) {
        (&self.address, &self.name)
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
