//! Application-aware static RRIP.
//!
//! Hits predict near-immediate reuse (`rrpv = 0`); fills predict a long
//! re-reference interval (`rrpv = max_rrpv - 1`). Victims come from the
//! requester's own lines at `max_rrpv` first, then from any line at
//! `max_rrpv`. When none exists, the requester's lines are aged, or every
//! line if it owns none.

use tracing::info;

use super::{ReplacementPolicy, check_access, check_way};
use crate::common::access::Access;
use crate::common::error::PolicyError;
use crate::common::line::CacheLine;
use crate::config::{PolicyConfig, PolicyKind};
use crate::stats::ReplacementStats;
use crate::units::aging::rrip_victim;

/// Application-aware RRIP state.
#[derive(Debug)]
pub struct RripPolicy {
    config: PolicyConfig,
    stats: ReplacementStats,
}

impl RripPolicy {
    /// Creates an application-aware RRIP instance.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidConfig`] if validation fails.
    pub fn new(config: &PolicyConfig) -> Result<Self, PolicyError> {
        config.validate()?;
        info!(
            policy = PolicyKind::AaRrip.name(),
            sets = config.sets,
            ways = config.ways,
            cpus = config.cpus,
            max_rrpv = config.max_rrpv,
            "replacement policy initialized"
        );
        Ok(Self {
            config: config.clone(),
            stats: ReplacementStats::new(PolicyKind::AaRrip.name(), config.cpus),
        })
    }
}

impl ReplacementPolicy for RripPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::AaRrip
    }

    fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn update_state(&mut self, lines: &mut [CacheLine], way: usize, access: &Access, hit: bool) {
        check_access(&self.config, lines, access);
        check_way(&self.config, way);
        self.stats
            .record_access(access.cpu, hit, access.kind.is_writeback());

        let line = &mut lines[way];
        if hit {
            line.set_rrpv(0);
        } else {
            line.set_owner(access.cpu);
            line.set_rrpv(self.config.max_rrpv - 1);
        }
    }

    fn find_victim(&mut self, lines: &mut [CacheLine], access: &Access) -> usize {
        check_access(&self.config, lines, access);
        let (way, rule) = rrip_victim(lines, access.cpu, self.config.max_rrpv, true);
        self.stats.record_victim(access.cpu, rule);
        way
    }

    fn stats(&self) -> &ReplacementStats {
        &self.stats
    }
}
