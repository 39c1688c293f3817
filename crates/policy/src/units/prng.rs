//! Linear-congruential pseudo-random generator.
//!
//! Simulation runs must be repeatable, so every random decision in the engine
//! comes from this fixed-seed LCG rather than an entropy source. The step is
//! `state = state * 1103515245 + 12345` with 64-bit wrap-around; a bounded
//! value is taken from the upper bits as `(state / 65536) % bound`.
//!
//! Each consumer owns its own instance so one stream never perturbs another:
//! leader-set sampling draws from one, bimodal insertion from another.

const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;

/// Seeded LCG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Creates a generator starting at `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current raw state.
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Value in `0..bound` derived from the current state, without stepping.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    #[inline]
    pub const fn peek(&self, bound: u64) -> u64 {
        (self.state / 65_536) % bound
    }

    /// Advances the state by one step.
    #[inline]
    pub const fn advance(&mut self) {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
    }

    /// Returns the bounded value of the current state, then steps.
    #[inline]
    pub const fn draw(&mut self, bound: u64) -> u64 {
        let value = self.peek(bound);
        self.advance();
        value
    }
}
