//! Replacement statistics collection and reporting.
//!
//! The engine only writes these counters; the host reads them once at the end
//! of a run through [`ReplacementPolicy::final_stats`](crate::ReplacementPolicy::final_stats).
//! It tracks:
//! 1. **Accesses:** Hits, misses, and writebacks per CPU.
//! 2. **Victims:** Which rule picked each victim, per requesting CPU.
//! 3. **Reuse history:** History matches and history evictions per CPU.
//! 4. **Set dueling:** Misses observed in each kind of leader set.

use std::fmt;

use crate::units::aging::VictimRule;
use crate::units::sampler::SetRole;

/// Diagnostic counters for one policy instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementStats {
    /// Policy name printed in the report header.
    pub policy: &'static str,
    /// Hits per CPU.
    pub hits: Vec<u64>,
    /// Misses (fills) per CPU.
    pub misses: Vec<u64>,
    /// Writeback accesses per CPU.
    pub writebacks: Vec<u64>,
    /// Victims of the requester found already at `max_rrpv`.
    pub victims_max_rrpv_same: Vec<u64>,
    /// Victims of another CPU found already at `max_rrpv`.
    pub victims_max_rrpv_other: Vec<u64>,
    /// Victims that needed RRPV aging first.
    pub victims_aged: Vec<u64>,
    /// Victims picked by LRU rank.
    pub victims_lru: Vec<u64>,
    /// Fills whose block was found in the reuse history.
    pub history_hits: Vec<u64>,
    /// Reuse-history entries evicted, by the CPU that owned them.
    pub history_evictions: Vec<u64>,
    /// Misses in aging leader sets.
    pub aging_leader_misses: u64,
    /// Misses in bias leader sets.
    pub bias_leader_misses: u64,
}

impl ReplacementStats {
    /// Creates zeroed counters for `cpus` applications.
    pub fn new(policy: &'static str, cpus: usize) -> Self {
        Self {
            policy,
            hits: vec![0; cpus],
            misses: vec![0; cpus],
            writebacks: vec![0; cpus],
            victims_max_rrpv_same: vec![0; cpus],
            victims_max_rrpv_other: vec![0; cpus],
            victims_aged: vec![0; cpus],
            victims_lru: vec![0; cpus],
            history_hits: vec![0; cpus],
            history_evictions: vec![0; cpus],
            aging_leader_misses: 0,
            bias_leader_misses: 0,
        }
    }

    /// Number of CPUs tracked.
    pub fn cpus(&self) -> usize {
        self.hits.len()
    }

    pub(crate) fn record_access(&mut self, cpu: usize, hit: bool, writeback: bool) {
        if hit {
            self.hits[cpu] += 1;
        } else {
            self.misses[cpu] += 1;
        }
        if writeback {
            self.writebacks[cpu] += 1;
        }
    }

    pub(crate) fn record_victim(&mut self, cpu: usize, rule: VictimRule) {
        let counter = match rule {
            VictimRule::RequesterAtMax => &mut self.victims_max_rrpv_same,
            VictimRule::OtherAtMax => &mut self.victims_max_rrpv_other,
            VictimRule::Aged => &mut self.victims_aged,
            VictimRule::Lru => &mut self.victims_lru,
        };
        counter[cpu] += 1;
    }

    pub(crate) fn record_history_hit(&mut self, cpu: usize) {
        self.history_hits[cpu] += 1;
    }

    pub(crate) fn record_history_eviction(&mut self, owner: usize) {
        if let Some(count) = self.history_evictions.get_mut(owner) {
            *count += 1;
        }
    }

    pub(crate) fn record_leader_miss(&mut self, role: SetRole) {
        match role {
            SetRole::AgingLeader => self.aging_leader_misses += 1,
            SetRole::BiasLeader => self.bias_leader_misses += 1,
            SetRole::Follower => {}
        }
    }

    /// Total victims selected for `cpu` across all rules.
    pub fn victims(&self, cpu: usize) -> u64 {
        self.victims_max_rrpv_same[cpu]
            + self.victims_max_rrpv_other[cpu]
            + self.victims_aged[cpu]
            + self.victims_lru[cpu]
    }

    /// Hit rate of `cpu` in percent, or 0 with no accesses.
    pub fn hit_rate(&self, cpu: usize) -> f64 {
        let total = self.hits[cpu] + self.misses[cpu];
        if total == 0 {
            0.0
        } else {
            self.hits[cpu] as f64 / total as f64 * 100.0
        }
    }
}

impl fmt::Display for ReplacementStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "REPLACEMENT STATISTICS ({})", self.policy)?;
        writeln!(f, "==========================================================")?;
        for cpu in 0..self.cpus() {
            writeln!(f, "CPU {cpu}")?;
            writeln!(f, "  repl.hits               {}", self.hits[cpu])?;
            writeln!(f, "  repl.misses             {}", self.misses[cpu])?;
            writeln!(f, "  repl.hit_rate           {:.2}%", self.hit_rate(cpu))?;
            writeln!(f, "  repl.writebacks         {}", self.writebacks[cpu])?;
            writeln!(f, "  victim.max_rrpv_same    {}", self.victims_max_rrpv_same[cpu])?;
            writeln!(f, "  victim.max_rrpv_other   {}", self.victims_max_rrpv_other[cpu])?;
            writeln!(f, "  victim.aged             {}", self.victims_aged[cpu])?;
            writeln!(f, "  victim.lru              {}", self.victims_lru[cpu])?;
            writeln!(f, "  ebis.hits               {}", self.history_hits[cpu])?;
            writeln!(f, "  ebis.evictions          {}", self.history_evictions[cpu])?;
            writeln!(f, "----------------------------------------------------------")?;
        }
        writeln!(f, "SET DUELING")?;
        writeln!(f, "  leader.rrip_misses      {}", self.aging_leader_misses)?;
        writeln!(f, "  leader.bip_misses       {}", self.bias_leader_misses)?;
        write!(f, "==========================================================")
    }
}
