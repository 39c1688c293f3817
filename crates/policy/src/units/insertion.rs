//! Insertion priority for filled lines.
//!
//! Two independent mechanisms decide where a missed block lands:
//! - [`BimodalInsertion`] places it in the LRU order: usually at MRU, but at
//!   LRU whenever a pseudo-random draw (mod 100) is at most `btp_number`.
//! - [`RrpvThrottle`] picks its RRPV: `max_rrpv` on most misses, but
//!   `max_rrpv - 1` on every `period`-th miss, a deterministic escape from
//!   inserting everything as dead.

use crate::common::line::CacheLine;

use super::aging::{demote, promote};
use super::prng::Lcg;

/// Where a bimodal insertion placed the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Rank 0.
    Mru,
    /// Rank `ways - 1`.
    Lru,
}

/// Probabilistic MRU/LRU placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BimodalInsertion {
    rng: Lcg,
    btp_number: u64,
}

impl BimodalInsertion {
    /// Creates the placement stream from `seed`.
    pub const fn new(seed: u64, btp_number: u64) -> Self {
        Self {
            rng: Lcg::new(seed),
            btp_number,
        }
    }

    /// Draws the next placement without touching any line.
    pub const fn next_placement(&mut self) -> Placement {
        if self.rng.draw(100) > self.btp_number {
            Placement::Mru
        } else {
            Placement::Lru
        }
    }

    /// Draws a placement and applies it to `way`.
    pub fn insert(&mut self, lines: &mut [CacheLine], way: usize) -> Placement {
        let placement = self.next_placement();
        match placement {
            Placement::Mru => promote(lines, way),
            Placement::Lru => demote(lines, way),
        }
        placement
    }
}

/// Deterministic every-Nth-miss RRPV relief.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrpvThrottle {
    counter: u32,
    period: u32,
}

impl RrpvThrottle {
    /// Creates a throttle firing on every `period`-th insertion.
    pub const fn new(period: u32) -> Self {
        Self { counter: 0, period }
    }

    /// Insertions counted since the last relief.
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// RRPV for the next inserted line.
    pub const fn next_rrpv(&mut self, max_rrpv: u8) -> u8 {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
            max_rrpv - 1
        } else {
            max_rrpv
        }
    }
}
