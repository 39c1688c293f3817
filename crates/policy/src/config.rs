//! Configuration for the replacement engine.
//!
//! This module defines the parameters of one policy instance. It provides:
//! 1. **Defaults:** The geometry and tuning constants of the reference design.
//! 2. **Kinds:** Which policy variant to build.
//! 3. **Validation:** Rejection of parameter sets the engine cannot run with.
//!
//! Configuration is supplied as JSON by the host or built with
//! `PolicyConfig::default()`; every field may be omitted.

use serde::Deserialize;

use crate::common::error::PolicyError;

/// Default configuration constants.
mod defaults {
    /// Sets per cache instance (2048 sets × 16 ways × 64 B = 2 MiB LLC).
    pub const SETS: usize = 2048;

    /// Associativity.
    pub const WAYS: usize = 16;

    /// CPUs (applications) sharing the cache.
    pub const CPUS: usize = 1;

    /// Largest RRPV; a 2-bit counter.
    pub const MAX_RRPV: u8 = 3;

    /// Bimodal throttle: a miss is inserted at LRU rank when the draw
    /// (mod 100) is at most this value, so roughly 9% of the time.
    pub const BTP_NUMBER: u64 = 8;

    /// Every `BIP_MAX`-th RRPV insertion lands at `max_rrpv - 1`.
    pub const BIP_MAX: u32 = 32;

    /// Leader sets per policy per CPU.
    pub const SAMPLER_SIZE: usize = 32;

    /// PSEL counter width in bits.
    pub const PSEL_BITS: u32 = 10;

    /// Capacity of the evicted-block reuse history.
    pub const HISTORY_SIZE: usize = 128;

    /// Initial LCG state shared by both pseudo-random streams.
    pub const SEED: u64 = 1_103_515_245 + 12_345;
}

/// Number of policies competing in set dueling.
pub const DUELING_POLICIES: usize = 2;

/// Replacement policy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Bimodal insertion over true LRU ranks.
    #[serde(alias = "BIP")]
    Bip,
    /// BIP whose insertion is overridden for blocks found in the reuse history.
    #[serde(alias = "BIP_EBIS")]
    BipEbis,
    /// Application-aware static RRIP.
    #[serde(alias = "AARRIP")]
    AaRrip,
    /// Set-dueling between RRIP and BIP.
    #[serde(alias = "DRRIP")]
    Drrip,
    /// Application-aware DRRIP with reuse-history insertion.
    #[default]
    #[serde(alias = "AADRRIP_EBIS")]
    AaDrripEbis,
}

impl PolicyKind {
    /// Returns `true` for kinds that sample leader sets and keep PSEL counters.
    pub const fn uses_dueling(self) -> bool {
        matches!(self, Self::Drrip | Self::AaDrripEbis)
    }

    /// Returns `true` for kinds that keep an evicted-block reuse history.
    pub const fn uses_history(self) -> bool {
        matches!(self, Self::BipEbis | Self::AaDrripEbis)
    }

    /// Short display name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bip => "BIP",
            Self::BipEbis => "BIP+EbIS",
            Self::AaRrip => "AA-RRIP",
            Self::Drrip => "DRRIP",
            Self::AaDrripEbis => "AA-DRRIP+EbIS",
        }
    }
}

/// Parameters of one replacement policy instance.
///
/// # Examples
///
/// ```
/// use rripsim_policy::config::{PolicyConfig, PolicyKind};
///
/// let config = PolicyConfig::from_json(r#"{ "policy": "drrip", "sets": 1024, "cpus": 4 }"#)
///     .unwrap();
/// assert_eq!(config.policy, PolicyKind::Drrip);
/// assert_eq!(config.ways, 16);
/// assert_eq!(config.leader_sets_total(), 4 * 2 * 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Policy variant to build.
    #[serde(default)]
    pub policy: PolicyKind,
    /// Number of sets.
    #[serde(default = "PolicyConfig::default_sets")]
    pub sets: usize,
    /// Associativity.
    #[serde(default = "PolicyConfig::default_ways")]
    pub ways: usize,
    /// CPUs sharing this cache instance.
    #[serde(default = "PolicyConfig::default_cpus")]
    pub cpus: usize,
    /// Largest RRPV value.
    #[serde(default = "PolicyConfig::default_max_rrpv")]
    pub max_rrpv: u8,
    /// Bimodal throttle threshold (out of 100).
    #[serde(default = "PolicyConfig::default_btp_number")]
    pub btp_number: u64,
    /// Period of the deterministic `max_rrpv - 1` insertion.
    #[serde(default = "PolicyConfig::default_bip_max")]
    pub bip_max: u32,
    /// Leader sets per policy per CPU.
    #[serde(default = "PolicyConfig::default_sampler_size")]
    pub sampler_size: usize,
    /// PSEL counter width in bits.
    #[serde(default = "PolicyConfig::default_psel_bits")]
    pub psel_bits: u32,
    /// Reuse-history capacity.
    #[serde(default = "PolicyConfig::default_history_size")]
    pub history_size: usize,
    /// Initial state of both pseudo-random streams.
    #[serde(default = "PolicyConfig::default_seed")]
    pub seed: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            sets: defaults::SETS,
            ways: defaults::WAYS,
            cpus: defaults::CPUS,
            max_rrpv: defaults::MAX_RRPV,
            btp_number: defaults::BTP_NUMBER,
            bip_max: defaults::BIP_MAX,
            sampler_size: defaults::SAMPLER_SIZE,
            psel_bits: defaults::PSEL_BITS,
            history_size: defaults::HISTORY_SIZE,
            seed: defaults::SEED,
        }
    }
}

impl PolicyConfig {
    const fn default_sets() -> usize {
        defaults::SETS
    }

    const fn default_ways() -> usize {
        defaults::WAYS
    }

    const fn default_cpus() -> usize {
        defaults::CPUS
    }

    const fn default_max_rrpv() -> u8 {
        defaults::MAX_RRPV
    }

    const fn default_btp_number() -> u64 {
        defaults::BTP_NUMBER
    }

    const fn default_bip_max() -> u32 {
        defaults::BIP_MAX
    }

    const fn default_sampler_size() -> usize {
        defaults::SAMPLER_SIZE
    }

    const fn default_psel_bits() -> u32 {
        defaults::PSEL_BITS
    }

    const fn default_history_size() -> usize {
        defaults::HISTORY_SIZE
    }

    const fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Creates a default configuration for `kind` with the given geometry.
    pub fn new(kind: PolicyKind, sets: usize, ways: usize, cpus: usize) -> Self {
        Self {
            policy: kind,
            sets,
            ways,
            cpus,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Parse`] for malformed JSON or unknown fields and
    /// [`PolicyError::InvalidConfig`] when [`validate`](Self::validate) fails.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Largest PSEL value, `2^psel_bits - 1`.
    pub const fn psel_max(&self) -> u32 {
        (1 << self.psel_bits) - 1
    }

    /// Follower sets use the RRIP rule while PSEL is above this value.
    pub const fn psel_threshold(&self) -> u32 {
        self.psel_max() / 2
    }

    /// Total leader sets sampled across all CPUs.
    pub const fn leader_sets_total(&self) -> usize {
        self.cpus * DUELING_POLICIES * self.sampler_size
    }

    /// Checks that the engine can run with these parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.sets == 0 {
            return Err(PolicyError::invalid("sets", "must be at least 1"));
        }
        if self.ways == 0 {
            return Err(PolicyError::invalid("ways", "must be at least 1"));
        }
        if self.cpus == 0 {
            return Err(PolicyError::invalid("cpus", "must be at least 1"));
        }
        if self.max_rrpv == 0 {
            return Err(PolicyError::invalid("max_rrpv", "must be at least 1"));
        }
        if self.btp_number >= 100 {
            return Err(PolicyError::invalid(
                "btp_number",
                format!("must be below 100, got {}", self.btp_number),
            ));
        }
        if self.bip_max == 0 {
            return Err(PolicyError::invalid("bip_max", "must be at least 1"));
        }
        if !(1..=31).contains(&self.psel_bits) {
            return Err(PolicyError::invalid(
                "psel_bits",
                format!("must be within 1..=31, got {}", self.psel_bits),
            ));
        }
        if self.history_size == 0 {
            return Err(PolicyError::invalid("history_size", "must be at least 1"));
        }
        if self.policy.uses_dueling() {
            if self.sampler_size == 0 {
                return Err(PolicyError::invalid("sampler_size", "must be at least 1"));
            }
            let wanted = self.leader_sets_total();
            if wanted > self.sets {
                return Err(PolicyError::invalid(
                    "sets",
                    format!(
                        "{} sets cannot hold {wanted} distinct leader sets ({} cpus x {DUELING_POLICIES} policies x {})",
                        self.sets, self.cpus, self.sampler_size
                    ),
                ));
            }
        }
        Ok(())
    }
}
