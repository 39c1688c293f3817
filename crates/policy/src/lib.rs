//! Cache line replacement-policy engine for set-associative cache models.
//!
//! This crate decides, per access, which way of a cache set to evict and what
//! recency state the filled or hit line receives. It provides:
//! 1. **Units:** Seeded LCG, set-dueling sampler, PSEL counters, the evicted-block
//!    reuse history (EbIS), and the RRPV / LRU-rank line transforms.
//! 2. **Policies:** BIP, BIP+EbIS, application-aware RRIP, DRRIP, and the
//!    application-aware DRRIP with reuse history, all behind [`ReplacementPolicy`].
//! 3. **Configuration:** Compiled-in defaults plus JSON deserialization.
//! 4. **Statistics:** Per-application counters and an end-of-run report.
//!
//! The host simulator owns the line array; it passes the addressed set's slice
//! of [`CacheLine`]s alongside the policy state on every call.

/// Shared types: access descriptors, per-line state, and errors.
pub mod common;
/// Policy configuration (defaults, policy kinds, validation).
pub mod config;
/// Replacement policy trait, factory, and variants.
pub mod policies;
/// Replacement statistics collection and reporting.
pub mod stats;
/// Building blocks shared by the policy variants.
pub mod units;

/// Access descriptor passed to every policy call.
pub use crate::common::access::{Access, AccessType};
/// Error type for configuration and boundary decoding.
pub use crate::common::error::PolicyError;
/// Per-slot replacement state.
pub use crate::common::line::CacheLine;
/// Root configuration type; use `PolicyConfig::default()` or `PolicyConfig::from_json`.
pub use crate::config::{PolicyConfig, PolicyKind};
/// Policy trait and factory.
pub use crate::policies::{ReplacementPolicy, build};
/// Diagnostic counters.
pub use crate::stats::ReplacementStats;
