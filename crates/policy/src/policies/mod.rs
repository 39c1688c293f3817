//! Cache Replacement Policies.
//!
//! Implements the victim-selection and insertion algorithms of the engine.
//!
//! # Policies
//!
//! - `Bip`: Bimodal insertion over LRU ranks, optionally with reuse history.
//! - `Rrip`: Application-aware static RRIP.
//! - `Drrip`: Set dueling between RRIP and BIP, optionally application-aware
//!   and with reuse history.
//!
//! # Calling convention
//!
//! The host owns the line array and hands each call the slice of the
//! addressed set. On a hit it calls [`ReplacementPolicy::update_state`] with
//! `hit = true`. On a miss it calls [`ReplacementPolicy::find_victim`] (unless
//! it fills an invalid way), then `update_state` with `hit = false` for the
//! filled way.

/// Bimodal insertion policy (with optional reuse history).
pub mod bip;

/// Set-dueling RRIP/BIP policy.
pub mod drrip;

/// Reuse-history verdict tracking shared by the history-aware policies.
pub mod reuse;

/// Application-aware static RRIP policy.
pub mod rrip;

use std::fmt;

pub use bip::BipPolicy;
pub use drrip::{ActiveRule, DrripPolicy};
pub use rrip::RripPolicy;

use crate::common::access::Access;
use crate::common::error::PolicyError;
use crate::common::line::CacheLine;
use crate::config::{PolicyConfig, PolicyKind};
use crate::stats::ReplacementStats;

/// Trait for cache replacement policies.
///
/// One value holds the whole replacement state of one cache instance and is
/// driven by one access stream at a time.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Variant implemented by this policy.
    fn kind(&self) -> PolicyKind;

    /// Configuration the policy was built with.
    fn config(&self) -> &PolicyConfig;

    /// Resets every line of the cache instance.
    ///
    /// # Arguments
    ///
    /// * `lines` - The full line array, `sets × ways` entries, set-major.
    ///
    /// # Panics
    ///
    /// Panics if `lines` does not hold exactly `sets × ways` entries.
    fn initialize(&self, lines: &mut [CacheLine]) {
        let config = self.config();
        assert_eq!(
            lines.len(),
            config.sets * config.ways,
            "line array must hold sets x ways entries"
        );
        for set in lines.chunks_mut(config.ways) {
            for (way, line) in set.iter_mut().enumerate() {
                *line = CacheLine::new(way, config.max_rrpv);
            }
        }
    }

    /// Updates replacement state after a hit or a fill.
    ///
    /// # Arguments
    ///
    /// * `lines` - The slice of the addressed set.
    /// * `way` - The way that was hit or filled.
    /// * `access` - The access being serviced.
    /// * `hit` - `true` for a hit, `false` for a fill after a miss.
    ///
    /// # Panics
    ///
    /// Panics if the cpu, set or way is out of range, or `lines` is not one set.
    fn update_state(&mut self, lines: &mut [CacheLine], way: usize, access: &Access, hit: bool);

    /// Selects the way to evict for a miss.
    ///
    /// RRPV aging applied during the search is kept in `lines`.
    ///
    /// # Returns
    ///
    /// The way to evict, always within `0..ways`.
    ///
    /// # Panics
    ///
    /// Panics if the cpu or set is out of range, or `lines` is not one set.
    fn find_victim(&mut self, lines: &mut [CacheLine], access: &Access) -> usize;

    /// Counters collected so far.
    fn stats(&self) -> &ReplacementStats;

    /// End-of-run report.
    fn final_stats(&self) -> String {
        self.stats().to_string()
    }
}

/// Builds the policy selected by `config.policy`.
///
/// # Errors
///
/// Returns an error if the configuration fails validation or leader-set
/// sampling cannot complete.
pub fn build(config: &PolicyConfig) -> Result<Box<dyn ReplacementPolicy>, PolicyError> {
    let policy: Box<dyn ReplacementPolicy> = match config.policy {
        PolicyKind::Bip | PolicyKind::BipEbis => Box::new(BipPolicy::new(config)?),
        PolicyKind::AaRrip => Box::new(RripPolicy::new(config)?),
        PolicyKind::Drrip | PolicyKind::AaDrripEbis => Box::new(DrripPolicy::new(config)?),
    };
    Ok(policy)
}

/// Asserts the host's side of the calling convention.
pub(crate) fn check_access(config: &PolicyConfig, lines: &[CacheLine], access: &Access) {
    assert!(
        access.cpu < config.cpus,
        "cpu {} out of range (cpus = {})",
        access.cpu,
        config.cpus
    );
    assert!(
        access.set < config.sets,
        "set {} out of range (sets = {})",
        access.set,
        config.sets
    );
    assert_eq!(
        lines.len(),
        config.ways,
        "expected the {} lines of one set",
        config.ways
    );
}

/// Asserts a way index supplied by the host.
pub(crate) fn check_way(config: &PolicyConfig, way: usize) {
    assert!(
        way < config.ways,
        "way {way} out of range (ways = {})",
        config.ways
    );
}
