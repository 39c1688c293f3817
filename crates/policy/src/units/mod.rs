//! Replacement building blocks.
//!
//! - `prng`: Seeded LCG shared by sampling and insertion.
//! - `sampler`: Leader-set selection for set dueling.
//! - `psel`: Per-CPU saturating policy selectors.
//! - `history`: Evicted-block reuse history (EbIS).
//! - `aging`: LRU-rank transforms and victim searches.
//! - `insertion`: Bimodal placement and RRPV throttling for fills.

/// LRU-rank transforms and victim searches.
pub mod aging;
/// Evicted-block reuse history.
pub mod history;
/// Fill-time placement.
pub mod insertion;
/// Linear-congruential pseudo-random generator.
pub mod prng;
/// Per-CPU policy selector counters.
pub mod psel;
/// Set-dueling leader sampler.
pub mod sampler;

pub use aging::VictimRule;
pub use history::{HistoryEntry, ReuseHistory};
pub use insertion::{BimodalInsertion, Placement, RrpvThrottle};
pub use prng::Lcg;
pub use psel::PolicySelector;
pub use sampler::{SetDuelingSampler, SetRole};
