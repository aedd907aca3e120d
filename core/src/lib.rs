//! The scan-and-collect engine.
//!
//! * [`scanner`]: fans out one [`scanner::probe::TargetProbe`] per target and
//!   merges their findings into a single [`scanner::FindingStream`].
//! * [`aggregator`]: drains the stream, drops repeated `(address, name)`
//!   pairs and forwards the rest to a [`aggregator::FindingSink`].
//! * [`output`]: the plain-text and CSV sinks.
//! * [`diagnostics`]: where per-target failures are reported.

pub mod aggregator;
pub mod diagnostics;
pub mod error;
pub mod network;
pub mod output;
pub mod scanner;
