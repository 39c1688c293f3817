//! Dynamic RRIP: set dueling between RRIP and BIP.
//!
//! Each CPU owns a fixed sample of leader sets. Half of them always evict by
//! RRPV (the aging rule) and half always evict by LRU rank (the bias rule).
//! Leader misses move that CPU's PSEL counter, and every other set follows the
//! rule PSEL currently favors.
//!
//! Both recency signals are maintained on every fill regardless of which rule
//! the set uses, because a follower set can switch rules at any miss:
//! - RRPV: `max_rrpv`, except every `bip_max`-th fill at `max_rrpv - 1`.
//! - LRU rank: the bimodal draw (MRU ≈92%, LRU otherwise).
//!
//! The `aa-drrip-ebis` variant adds two things. Its aging rule is
//! application-aware. A fill whose address the reuse history already holds
//! skips both rules and lands at `rrpv = 0`, rank 0. Writebacks set
//! `rrpv = max_rrpv - 1` and never change rank.

use tracing::{info, trace};

use super::reuse::{HistoryKey, ReuseFilter};
use super::{ReplacementPolicy, check_access, check_way};
use crate::common::access::Access;
use crate::common::error::PolicyError;
use crate::common::line::CacheLine;
use crate::config::{PolicyConfig, PolicyKind};
use crate::stats::ReplacementStats;
use crate::units::aging::{VictimRule, lru_victim, promote, rrip_victim};
use crate::units::history::ReuseHistory;
use crate::units::insertion::{BimodalInsertion, RrpvThrottle};
use crate::units::prng::Lcg;
use crate::units::psel::PolicySelector;
use crate::units::sampler::{SetDuelingSampler, SetRole};

/// Victim rule in effect for one (cpu, set) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveRule {
    /// Evict by RRPV.
    Aging,
    /// Evict by LRU rank.
    Bias,
}

/// DRRIP policy state for one cache instance.
#[derive(Debug)]
pub struct DrripPolicy {
    config: PolicyConfig,
    sampler: SetDuelingSampler,
    psel: PolicySelector,
    insertion: BimodalInsertion,
    throttle: RrpvThrottle,
    reuse: Option<ReuseFilter>,
    app_aware: bool,
    stats: ReplacementStats,
}

impl DrripPolicy {
    /// Creates a DRRIP instance and samples its leader sets.
    ///
    /// `PolicyKind::AaDrripEbis` enables application awareness and the reuse
    /// history; any other kind builds plain DRRIP.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or leader sampling cannot place
    /// every leader.
    pub fn new(config: &PolicyConfig) -> Result<Self, PolicyError> {
        config.validate()?;
        let enriched = config.policy == PolicyKind::AaDrripEbis;

        let mut sampler_rng = Lcg::new(config.seed);
        let sampler =
            SetDuelingSampler::new(config.sets, config.cpus, config.sampler_size, &mut sampler_rng)?;

        let kind = if enriched {
            PolicyKind::AaDrripEbis
        } else {
            PolicyKind::Drrip
        };
        info!(
            policy = kind.name(),
            sets = config.sets,
            ways = config.ways,
            cpus = config.cpus,
            leaders = sampler.len(),
            psel_max = config.psel_max(),
            "replacement policy initialized"
        );

        Ok(Self {
            config: config.clone(),
            sampler,
            psel: PolicySelector::new(config.cpus, config.psel_bits),
            insertion: BimodalInsertion::new(config.seed, config.btp_number),
            throttle: RrpvThrottle::new(config.bip_max),
            reuse: enriched
                .then(|| ReuseFilter::new(config.history_size, config.cpus, HistoryKey::Address)),
            app_aware: enriched,
            stats: ReplacementStats::new(kind.name(), config.cpus),
        })
    }

    /// Leader-set assignment.
    pub const fn sampler(&self) -> &SetDuelingSampler {
        &self.sampler
    }

    /// PSEL counters.
    pub const fn psel(&self) -> &PolicySelector {
        &self.psel
    }

    /// Reuse history, if this instance keeps one.
    pub fn history(&self) -> Option<&ReuseHistory> {
        self.reuse.as_ref().map(ReuseFilter::history)
    }

    /// Fills counted toward the next `max_rrpv - 1` insertion.
    pub const fn throttle_counter(&self) -> u32 {
        self.throttle.counter()
    }

    /// Rule a miss from `cpu` in `set` would use right now.
    pub fn active_rule(&self, cpu: usize, set: usize) -> ActiveRule {
        match self.sampler.role(cpu, set) {
            SetRole::AgingLeader => ActiveRule::Aging,
            SetRole::BiasLeader => ActiveRule::Bias,
            SetRole::Follower if self.psel.prefers_aging(cpu) => ActiveRule::Aging,
            SetRole::Follower => ActiveRule::Bias,
        }
    }

    /// Feeds a leader miss into PSEL and resolves the rule for this miss.
    fn resolve_rule(&mut self, cpu: usize, set: usize) -> ActiveRule {
        let role = self.sampler.role(cpu, set);
        match role {
            SetRole::AgingLeader => self.psel.record_aging_miss(cpu),
            SetRole::BiasLeader => self.psel.record_bias_miss(cpu),
            SetRole::Follower => {}
        }
        self.stats.record_leader_miss(role);
        self.active_rule(cpu, set)
    }
}

impl ReplacementPolicy for DrripPolicy {
    fn kind(&self) -> PolicyKind {
        if self.app_aware {
            PolicyKind::AaDrripEbis
        } else {
            PolicyKind::Drrip
        }
    }

    fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn update_state(&mut self, lines: &mut [CacheLine], way: usize, access: &Access, hit: bool) {
        check_access(&self.config, lines, access);
        check_way(&self.config, way);
        let max_rrpv = self.config.max_rrpv;
        self.stats
            .record_access(access.cpu, hit, access.kind.is_writeback());

        if !hit {
            lines[way].set_owner(access.cpu);
        }

        if access.kind.is_writeback() {
            lines[way].set_rrpv(max_rrpv - 1);
            return;
        }

        if hit {
            lines[way].set_rrpv(0);
            promote(lines, way);
            return;
        }

        let reused = self
            .reuse
            .as_mut()
            .is_some_and(|reuse| reuse.take_verdict(access));
        if reused {
            self.stats.record_history_hit(access.cpu);
            lines[way].set_rrpv(0);
            promote(lines, way);
            return;
        }

        let rrpv = self.throttle.next_rrpv(max_rrpv);
        lines[way].set_rrpv(rrpv);
        let placement = self.insertion.insert(lines, way);
        trace!(set = access.set, way, rrpv, ?placement, "drrip fill");
    }

    fn find_victim(&mut self, lines: &mut [CacheLine], access: &Access) -> usize {
        check_access(&self.config, lines, access);
        let (way, rule) = match self.resolve_rule(access.cpu, access.set) {
            ActiveRule::Aging => {
                rrip_victim(lines, access.cpu, self.config.max_rrpv, self.app_aware)
            }
            ActiveRule::Bias => (lru_victim(lines), VictimRule::Lru),
        };
        self.stats.record_victim(access.cpu, rule);

        if let Some(reuse) = self.reuse.as_mut() {
            reuse.observe_miss(access, &mut self.stats);
        }
        way
    }

    fn stats(&self) -> &ReplacementStats {
        &self.stats
    }
}
