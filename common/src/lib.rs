//! Shared model for the `dnsrange` workspace.
//!
//! Everything here is free of network IO: address ranges and their expansion,
//! scan targets, the [`finding::Finding`] record and the immutable scan
//! configuration handed to the engine at startup.

pub mod config;
pub mod error;
pub mod finding;
pub mod network;
