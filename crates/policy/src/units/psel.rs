//! Policy selector (PSEL) counters.
//!
//! One saturating counter per CPU arbitrates between the RRIP and BIP rules for
//! that CPU's follower sets. A miss in an aging leader set counts against RRIP
//! (decrement). A miss in a bias leader set counts against BIP (increment).
//! Followers use RRIP while the counter sits above `max / 2`.

use tracing::debug;

/// Per-CPU saturating PSEL counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySelector {
    counters: Vec<u32>,
    max: u32,
}

impl PolicySelector {
    /// Creates `cpus` counters of `bits` width, all starting at zero (BIP).
    pub fn new(cpus: usize, bits: u32) -> Self {
        Self {
            counters: vec![0; cpus],
            max: (1 << bits) - 1,
        }
    }

    /// Saturation ceiling.
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Follower threshold.
    pub const fn threshold(&self) -> u32 {
        self.max / 2
    }

    /// Current counter value for `cpu`.
    pub fn value(&self, cpu: usize) -> u32 {
        self.counters[cpu]
    }

    /// Returns `true` while `cpu`'s followers should use the RRIP rule.
    pub fn prefers_aging(&self, cpu: usize) -> bool {
        self.counters[cpu] > self.threshold()
    }

    /// Records a miss in one of `cpu`'s aging leader sets.
    pub fn record_aging_miss(&mut self, cpu: usize) {
        let before = self.prefers_aging(cpu);
        let counter = &mut self.counters[cpu];
        *counter = counter.saturating_sub(1);
        self.log_flip(cpu, before);
    }

    /// Records a miss in one of `cpu`'s bias leader sets.
    pub fn record_bias_miss(&mut self, cpu: usize) {
        let before = self.prefers_aging(cpu);
        let counter = &mut self.counters[cpu];
        if *counter < self.max {
            *counter += 1;
        }
        self.log_flip(cpu, before);
    }

    fn log_flip(&self, cpu: usize, before: bool) {
        let after = self.prefers_aging(cpu);
        if before != after {
            debug!(
                cpu,
                psel = self.counters[cpu],
                followers = if after { "rrip" } else { "bip" },
                "PSEL crossed threshold"
            );
        }
    }
}
