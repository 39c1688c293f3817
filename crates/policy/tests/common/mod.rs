//! Shared test infrastructure.

/// Minimal host cache driving a policy.
pub mod harness;
