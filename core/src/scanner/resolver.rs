//! Reverse (PTR) name resolution for probed addresses.

use std::io;
use std::net::IpAddr;

use async_trait::async_trait;
use dnsrange_protocols::rdns::PtrResolver;
use tokio::sync::OnceCell;

#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// Names the address maps back to. An empty list means no record.
    async fn reverse(&self, addr: IpAddr) -> io::Result<Vec<String>>;
}

/// Sends PTR queries to the nameservers the host is configured with.
///
/// The configuration is read on the first lookup. If it cannot be read, that
/// lookup fails and the next one tries again.
#[derive(Debug, Default)]
pub struct SystemResolver {
    resolver: OnceCell<PtrResolver>,
}

#[async_trait]
impl ReverseResolver for SystemResolver {
    async fn reverse(&self, addr: IpAddr) -> io::Result<Vec<String>> {
        let resolver = self
            .resolver
            .get_or_try_init(|| async { PtrResolver::from_system_conf() })
            .await?;
        resolver.reverse_lookup(addr).await
    }
}

/// Never sends a query. Used when reverse lookups are switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledResolver;

#[async_trait]
impl ReverseResolver for DisabledResolver {
    async fn reverse(&self, _addr: IpAddr) -> io::Result<Vec<String>> {
        Ok(Vec::new())
    }
}
