//! Protocol helpers used by the probes.
//!
//! * [`tls`]: a client configuration that accepts any server certificate, and
//!   extraction of the identity names a certificate claims.
//! * [`rdns`]: reverse (PTR) lookups against the host's configured nameservers.

pub mod rdns;
pub mod tls;
