//! Per-way replacement state.
//!
//! Each slot of a set carries two independent recency signals that different
//! decision points read:
//! - `rrpv`: coarse re-reference class, `0` (reuse soon) to `max_rrpv` (dead).
//!   Read by the RRIP victim search.
//! - `lru_rank`: exact recency order within the set, `0` (MRU) to `ways - 1`
//!   (LRU). Read by the BIP victim search.
//!
//! The host owns the line array; only the policy mutates these fields.

/// Replacement state of one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheLine {
    owner: usize,
    rrpv: u8,
    lru_rank: usize,
}

impl CacheLine {
    /// Creates the reset state for slot `way`: owned by CPU 0, predicted dead
    /// (`rrpv = max_rrpv`), and ranked by way so a fresh set's ranks form a
    /// permutation of `0..ways`.
    pub const fn new(way: usize, max_rrpv: u8) -> Self {
        Self {
            owner: 0,
            rrpv: max_rrpv,
            lru_rank: way,
        }
    }

    /// Creates a line with explicit state.
    ///
    /// The caller is responsible for keeping `rrpv` within the policy's
    /// `max_rrpv` and the set's ranks a permutation of `0..ways`.
    pub const fn with_state(owner: usize, rrpv: u8, lru_rank: usize) -> Self {
        Self {
            owner,
            rrpv,
            lru_rank,
        }
    }

    /// Application (CPU) that filled this line.
    #[inline]
    pub const fn owner(&self) -> usize {
        self.owner
    }

    /// Re-reference prediction value.
    #[inline]
    pub const fn rrpv(&self) -> u8 {
        self.rrpv
    }

    /// Recency rank within the set (0 = MRU).
    #[inline]
    pub const fn lru_rank(&self) -> usize {
        self.lru_rank
    }

    #[inline]
    pub(crate) const fn set_owner(&mut self, owner: usize) {
        self.owner = owner;
    }

    #[inline]
    pub(crate) const fn set_rrpv(&mut self, rrpv: u8) {
        self.rrpv = rrpv;
    }

    #[inline]
    pub(crate) const fn set_lru_rank(&mut self, rank: usize) {
        self.lru_rank = rank;
    }
}
