//! # Scan Target Model
//!
//! A target is one `(address, port)` pair. Ports are kept as the raw tokens
//! the user typed: they are not validated and are only joined into the
//! `address:port` endpoint handed to the connector.

use std::fmt;
use std::net::IpAddr;

use crate::network::range::AddressRange;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub addr: IpAddr,
    pub port: String,
}

impl Target {
    pub fn new(addr: IpAddr, port: impl Into<String>) -> Self {
        Self {
            addr,
            port: port.into(),
        }
    }

    /// Connection endpoint, with IPv6 addresses bracketed.
    pub fn endpoint(&self) -> String {
        match self.addr {
            IpAddr::V4(v4) => format!("{v4}:{}", self.port),
            IpAddr::V6(v6) => format!("[{v6}]:{}", self.port),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.endpoint())
    }
}

/// Splits a comma-separated port list. Tokens are passed through untouched.
pub fn parse_ports(s: &str) -> Vec<String> {
    s.split(',').map(str::to_owned).collect()
}

/// Full cross product of the range and the port tokens, address-major.
///
/// Duplicated port tokens produce duplicated targets.
pub fn cross_product<'a>(
    range: &'a AddressRange,
    ports: &'a [String],
) -> impl Iterator<Item = Target> + 'a {
    range
        .iter()
        .flat_map(move |addr| ports.iter().map(move |port| Target::new(addr, port.clone())))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
