use std::fmt;
use std::io;
use std::net::IpAddr;

use hickory_resolver::TokioResolver;
use hickory_resolver::name_server::TokioConnectionProvider;

/// PTR lookups against the nameservers of the host's resolver configuration.
#[derive(Clone)]
pub struct PtrResolver {
    inner: TokioResolver,
}

impl PtrResolver {
    /// Reads the system resolver configuration (`/etc/resolv.conf` on Unix).
    pub fn from_system_conf() -> io::Result<Self> {
        let inner = TokioResolver::builder(TokioConnectionProvider::default())
            .map_err(io::Error::other)?
            .build();
        Ok(Self { inner })
    }

    /// Every name the PTR records of `addr` point at, without the root dot.
    ///
    /// An answer that only echoes the numeric address back is not a name.
    pub async fn reverse_lookup(&self, addr: IpAddr) -> io::Result<Vec<String>> {
        let answer = self
            .inner
            .reverse_lookup(addr)
            .await
            .map_err(io::Error::other)?;
        Ok(names_from_answer(addr, answer.iter().map(|ptr| ptr.to_string())))
    }
}

impl fmt::Debug for PtrResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtrResolver").finish_non_exhaustive()
    }
}

fn names_from_answer(addr: IpAddr, answer: impl IntoIterator<Item = String>) -> Vec<String> {
    answer
        .into_iter()
        .map(|name| name.trim_end_matches('.').to_string())
        .filter(|name| !name.is_empty() && name.parse::<IpAddr>().ok() != Some(addr))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
