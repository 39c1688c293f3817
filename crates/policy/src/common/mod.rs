//! Common types shared by every policy.
//!
//! This module provides:
//! 1. **Accesses:** The access kind enumeration and the per-access descriptor.
//! 2. **Lines:** Per-way replacement state (owner, RRPV, LRU rank).
//! 3. **Errors:** The crate error type.

/// Access kinds and the per-access descriptor.
pub mod access;
/// Error type for configuration and boundary decoding.
pub mod error;
/// Per-way replacement state.
pub mod line;

pub use access::{Access, AccessType};
pub use error::PolicyError;
pub use line::CacheLine;
