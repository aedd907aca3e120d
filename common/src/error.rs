use thiserror::Error;

/// Failures while turning a range expression into addresses.
///
/// All of these are fatal for a run: they are raised before any probe starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("invalid CIDR '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },

    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error("invalid range: {start} and {end} are not the same address family")]
    MixedFamilies { start: String, end: String },
}
