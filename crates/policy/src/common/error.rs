//! Error definitions.
//!
//! Errors only arise while building a policy or decoding raw host values.
//! Per-access entry points never fail: their preconditions (cpu, set and way
//! in range) are asserted at the trait boundary.

use thiserror::Error;

/// Errors reported while configuring or constructing a replacement policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A configuration field holds a value the engine cannot run with.
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// The JSON configuration could not be parsed.
    #[error("failed to parse policy configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A raw access-type code outside the known range.
    #[error("unknown access type code {0}")]
    UnknownAccessType(u8),

    /// Leader-set sampling hit its draw limit before placing every leader.
    #[error("set sampler placed {placed} of {wanted} leader sets before exhausting its draws")]
    SamplerExhausted {
        /// Leader sets placed before giving up.
        placed: usize,
        /// Leader sets requested.
        wanted: usize,
    },
}

impl PolicyError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
