//! Reuse-history verdicts.
//!
//! The incoming block is recorded in the history during victim selection, but
//! its insertion priority is decided at the fill that follows. The verdict
//! (whether the block was already in the history) is taken *before*
//! recording, held until the matching fill, then consumed. A fill with no
//! preceding victim search (the host used an invalid way) queries the history
//! directly.

use crate::common::access::Access;
use crate::stats::ReplacementStats;
use crate::units::history::{HistoryEntry, ReuseHistory};

/// How a block identity is matched against the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKey {
    /// Address only.
    Address,
    /// Set and address.
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFill {
    set: usize,
    address: u64,
    reused: bool,
}

/// Reuse history plus the verdict of the miss in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReuseFilter {
    history: ReuseHistory,
    key: HistoryKey,
    pending: Option<PendingFill>,
}

impl ReuseFilter {
    /// Creates an empty filter.
    pub fn new(capacity: usize, cpus: usize, key: HistoryKey) -> Self {
        Self {
            history: ReuseHistory::new(capacity, cpus),
            key,
            pending: None,
        }
    }

    /// Underlying history.
    pub const fn history(&self) -> &ReuseHistory {
        &self.history
    }

    fn seen(&self, access: &Access) -> bool {
        match self.key {
            HistoryKey::Address => self.history.contains(access.address),
            HistoryKey::Block => self.history.contains_block(access.set, access.address),
        }
    }

    /// Takes the verdict for a miss, then records its block.
    pub fn observe_miss(&mut self, access: &Access, stats: &mut ReplacementStats) {
        let reused = self.seen(access);
        let evicted = self.history.record(HistoryEntry {
            cpu: access.cpu,
            set: access.set,
            address: access.address,
        });
        if let Some(entry) = evicted {
            stats.record_history_eviction(entry.cpu);
        }
        self.pending = Some(PendingFill {
            set: access.set,
            address: access.address,
            reused,
        });
    }

    /// Returns whether the block being filled was in the history.
    pub fn take_verdict(&mut self, access: &Access) -> bool {
        match self.pending.take() {
            Some(p) if p.set == access.set && p.address == access.address => p.reused,
            _ => self.seen(access),
        }
    }
}
