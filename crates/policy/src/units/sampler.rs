//! Set-dueling sampler.
//!
//! At construction the sampler draws `cpus × 2 × sampler_size` distinct set
//! indices from an LCG, rejecting duplicates, and keeps them in one sorted
//! list. The list is cut into one contiguous block of `2 × sampler_size`
//! entries per CPU. Within a CPU's block, even positions lead for the RRIP
//! (aging) rule and odd positions lead for the BIP (bias) rule. Every other
//! set is a follower for that CPU. The assignment never changes afterwards.

use crate::common::error::PolicyError;
use crate::config::DUELING_POLICIES;

use super::prng::Lcg;

/// Rejection draws allowed per requested leader before sampling gives up.
const DRAWS_PER_LEADER: usize = 4096;

/// Role a set plays for one CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetRole {
    /// Follows whichever rule PSEL currently favors.
    Follower,
    /// Always uses the RRIP rule; its misses pull PSEL down.
    AgingLeader,
    /// Always uses the BIP rule; its misses push PSEL up.
    BiasLeader,
}

/// Fixed leader-set assignment for one cache instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDuelingSampler {
    /// Sorted, duplicate-free leader set indices.
    leaders: Vec<usize>,
    /// Leaders per CPU block.
    block: usize,
    cpus: usize,
}

impl SetDuelingSampler {
    /// Samples leader sets for `cpus` applications over `sets` sets.
    ///
    /// A draw is taken from the current generator state; the generator only
    /// steps when that draw collides with an already placed leader.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidConfig`] if `sets` cannot hold every
    /// leader, and [`PolicyError::SamplerExhausted`] if the draw budget runs
    /// out first.
    pub fn new(
        sets: usize,
        cpus: usize,
        sampler_size: usize,
        rng: &mut Lcg,
    ) -> Result<Self, PolicyError> {
        let block = DUELING_POLICIES * sampler_size;
        let wanted = cpus * block;
        if wanted > sets {
            return Err(PolicyError::invalid(
                "sets",
                format!("{sets} sets cannot hold {wanted} distinct leader sets"),
            ));
        }

        let bound = sets as u64;
        let mut leaders: Vec<usize> = Vec::with_capacity(wanted);
        let mut budget = wanted.saturating_mul(DRAWS_PER_LEADER);

        while leaders.len() < wanted {
            let candidate = rng.peek(bound) as usize;
            match leaders.binary_search(&candidate) {
                Ok(_) => {
                    if budget == 0 {
                        return Err(PolicyError::SamplerExhausted {
                            placed: leaders.len(),
                            wanted,
                        });
                    }
                    budget -= 1;
                    rng.advance();
                }
                Err(pos) => leaders.insert(pos, candidate),
            }
        }

        Ok(Self {
            leaders,
            block,
            cpus,
        })
    }

    /// All leader sets, sorted.
    pub fn leaders(&self) -> &[usize] {
        &self.leaders
    }

    /// Total number of leader sets.
    pub fn len(&self) -> usize {
        self.leaders.len()
    }

    /// Returns `true` if no leaders were sampled.
    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty()
    }

    /// Leader sets belonging to `cpu`, in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if `cpu` is outside the configured range.
    pub fn leaders_of(&self, cpu: usize) -> &[usize] {
        assert!(cpu < self.cpus, "cpu {cpu} out of range (cpus = {})", self.cpus);
        let start = cpu * self.block;
        &self.leaders[start..start + self.block]
    }

    /// Role of `set` for `cpu`.
    pub fn role(&self, cpu: usize, set: usize) -> SetRole {
        match self.leaders_of(cpu).binary_search(&set) {
            Err(_) => SetRole::Follower,
            Ok(pos) if pos % 2 == 0 => SetRole::AgingLeader,
            Ok(_) => SetRole::BiasLeader,
        }
    }
}
