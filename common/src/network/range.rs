//! # Address Range Expansion
//!
//! Turns a range expression into the ordered list of addresses it covers.
//!
//! Two forms are accepted, told apart by the presence of a hyphen:
//! * **Explicit range**: `A-B`, every address from `A` through `B` inclusive.
//! * **CIDR block**: `A/n`, the network address through the last address of
//!   the block. A bare address is read as a single-host block.
//!
//! Both IPv4 and IPv6 are supported. Expansion is lazy and restartable.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;

use crate::error::RangeError;

/// A continuous, inclusive range of addresses of one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    start_addr: IpAddr,
    end_addr: IpAddr,
}

impl AddressRange {
    /// Builds a range, rejecting mixed families and `start > end`.
    pub fn new(start_addr: IpAddr, end_addr: IpAddr) -> Result<Self, RangeError> {
        if start_addr.is_ipv4() != end_addr.is_ipv4() {
            return Err(RangeError::MixedFamilies {
                start: start_addr.to_string(),
                end: end_addr.to_string(),
            });
        }
        if start_addr > end_addr {
            return Err(RangeError::InvalidRange {
                start: start_addr.to_string(),
                end: end_addr.to_string(),
            });
        }
        Ok(Self {
            start_addr,
            end_addr,
        })
    }

    pub fn single(addr: IpAddr) -> Self {
        Self {
            start_addr: addr,
            end_addr: addr,
        }
    }

    pub fn start(&self) -> IpAddr {
        self.start_addr
    }

    pub fn end(&self) -> IpAddr {
        self.end_addr
    }

    pub fn iter(&self) -> AddressIter {
        AddressIter {
            next: Some(self.start_addr),
            end: self.end_addr,
        }
    }

    /// Number of addresses in the range. Saturates at `u128::MAX` for `::/0`.
    pub fn len(&self) -> u128 {
        let span = match (self.start_addr, self.end_addr) {
            (IpAddr::V4(start), IpAddr::V4(end)) => u128::from(u32::from(end).saturating_sub(u32::from(start))),
            (IpAddr::V6(start), IpAddr::V6(end)) => u128::from(end).saturating_sub(u128::from(start)),
            _ => 0,
        };
        span.saturating_add(1)
    }

    /// A range always holds at least its start address.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a AddressRange {
    type Item = IpAddr;
    type IntoIter = AddressIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for AddressRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('-') {
            Some((start, end)) => parse_explicit_range(start, end),
            None => parse_cidr_range(s),
        }
    }
}

/// Walks a range one address at a time using [`increment`].
#[derive(Debug, Clone)]
pub struct AddressIter {
    next: Option<IpAddr>,
    end: IpAddr,
}

impl Iterator for AddressIter {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let current = self.next?;
        // Stops on a family mismatch too, so a malformed range cannot cycle.
        self.next = if current >= self.end || current.is_ipv4() != self.end.is_ipv4() {
            None
        } else {
            Some(increment(current))
        };
        Some(current)
    }
}

/// Adds one to the address, carrying across every byte and wrapping at the top.
pub fn increment(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => IpAddr::V4(Ipv4Addr::from(u32::from(v4).wrapping_add(1))),
        IpAddr::V6(v6) => IpAddr::V6(Ipv6Addr::from(u128::from(v6).wrapping_add(1))),
    }
}

/// Range covering a whole network block, network address through last address.
pub fn cidr_range(network: IpNetwork) -> AddressRange {
    let (start_addr, end_addr) = match network {
        IpNetwork::V4(net) => (IpAddr::V4(net.network()), IpAddr::V4(net.broadcast())),
        IpNetwork::V6(net) => {
            let first = net.network();
            let last = u128::from(first) | !u128::from(net.mask());
            (IpAddr::V6(first), IpAddr::V6(Ipv6Addr::from(last)))
        }
    };
    AddressRange {
        start_addr,
        end_addr,
    }
}

fn parse_explicit_range(start: &str, end: &str) -> Result<AddressRange, RangeError> {
    let start_addr = parse_addr(start)?;
    let end_addr = parse_addr(end)?;
    AddressRange::new(start_addr, end_addr)
}

fn parse_addr(s: &str) -> Result<IpAddr, RangeError> {
    s.trim()
        .parse::<IpAddr>()
        .map_err(|_| RangeError::InvalidAddress(s.to_string()))
}

fn parse_cidr_range(s: &str) -> Result<AddressRange, RangeError> {
    let network = s.parse::<IpNetwork>().map_err(|e| RangeError::InvalidCidr {
        input: s.to_string(),
        reason: e.to_string(),
    })?;
    Ok(cidr_range(network))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
