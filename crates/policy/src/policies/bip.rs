//! Bimodal Insertion Policy (BIP).
//!
//! BIP evicts the true LRU line but inserts most fills at the MRU position and
//! a small, pseudo-random fraction at the LRU position. A streaming working
//! set larger than the cache then stays in the LRU slot instead of flushing
//! the reused lines.
//!
//! With a reuse history (`bip-ebis`), a fill whose `(set, address)` was
//! recorded by an earlier miss always goes to MRU. The history is shared by
//! all CPUs and evicted per application even though BIP itself is not
//! application-aware.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update_state()`: O(W) plus O(H) for the history lookup
//!   - `find_victim()`: O(W) plus O(C × H) when the history evicts
//! - **Space Complexity:** O(H) beyond the line array (W ways, C cpus,
//!   H history entries)

use tracing::info;

use super::reuse::{HistoryKey, ReuseFilter};
use super::{ReplacementPolicy, check_access, check_way};
use crate::common::access::Access;
use crate::common::error::PolicyError;
use crate::common::line::CacheLine;
use crate::config::{PolicyConfig, PolicyKind};
use crate::stats::ReplacementStats;
use crate::units::aging::{VictimRule, lru_victim, promote};
use crate::units::history::ReuseHistory;
use crate::units::insertion::BimodalInsertion;

/// BIP policy state.
#[derive(Debug)]
pub struct BipPolicy {
    config: PolicyConfig,
    insertion: BimodalInsertion,
    reuse: Option<ReuseFilter>,
    stats: ReplacementStats,
}

impl BipPolicy {
    /// Creates a BIP instance; `config.policy` selects whether a reuse history
    /// is kept.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidConfig`] if validation fails.
    pub fn new(config: &PolicyConfig) -> Result<Self, PolicyError> {
        config.validate()?;
        let reuse = config
            .policy
            .uses_history()
            .then(|| ReuseFilter::new(config.history_size, config.cpus, HistoryKey::Block));
        info!(
            policy = config.policy.name(),
            sets = config.sets,
            ways = config.ways,
            cpus = config.cpus,
            "replacement policy initialized"
        );
        Ok(Self {
            config: config.clone(),
            insertion: BimodalInsertion::new(config.seed, config.btp_number),
            reuse,
            stats: ReplacementStats::new(config.policy.name(), config.cpus),
        })
    }

    /// Reuse history, if this instance keeps one.
    pub fn history(&self) -> Option<&ReuseHistory> {
        self.reuse.as_ref().map(ReuseFilter::history)
    }
}

impl ReplacementPolicy for BipPolicy {
    fn kind(&self) -> PolicyKind {
        if self.reuse.is_some() {
            PolicyKind::BipEbis
        } else {
            PolicyKind::Bip
        }
    }

    fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Hits move to MRU. Writeback hits leave the order untouched. Fills go
    /// to MRU when found in the history, otherwise to MRU or LRU by the
    /// bimodal draw.
    fn update_state(&mut self, lines: &mut [CacheLine], way: usize, access: &Access, hit: bool) {
        check_access(&self.config, lines, access);
        check_way(&self.config, way);
        self.stats
            .record_access(access.cpu, hit, access.kind.is_writeback());

        if hit {
            if !access.kind.is_writeback() {
                promote(lines, way);
            }
            return;
        }

        lines[way].set_owner(access.cpu);
        let reused = self
            .reuse
            .as_mut()
            .is_some_and(|reuse| reuse.take_verdict(access));
        if reused {
            self.stats.record_history_hit(access.cpu);
            promote(lines, way);
        } else {
            let _ = self.insertion.insert(lines, way);
        }
    }

    /// Returns the way with the largest LRU rank.
    fn find_victim(&mut self, lines: &mut [CacheLine], access: &Access) -> usize {
        check_access(&self.config, lines, access);
        let way = lru_victim(lines);
        self.stats.record_victim(access.cpu, VictimRule::Lru);
        if let Some(reuse) = self.reuse.as_mut() {
            reuse.observe_miss(access, &mut self.stats);
        }
        way
    }

    fn stats(&self) -> &ReplacementStats {
        &self.stats
    }
}
