//! Evicted-block insertion stream (EbIS) reuse history.
//!
//! A bounded FIFO of block identities recorded on misses. A later miss to an
//! identity still in the FIFO means the block left the cache and came back,
//! so the policy inserts it at high priority instead of applying its normal
//! insertion rule.
//!
//! When full, the history evicts one entry before appending. The entry is the
//! oldest one of the application with the largest positive score
//! `count(app) - first_index(app)`. Many entries sitting near the front mean a
//! heavy and stale contributor. A round-robin cursor breaks ties and names
//! the target when no application scores positive.
//!
//! Both scans run over the whole FIFO for every CPU, which costs
//! `O(cpus × capacity)` per eviction.

use std::collections::VecDeque;

use tracing::debug;

/// One recorded block identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    /// CPU whose miss recorded the block.
    pub cpu: usize,
    /// Set the block maps to.
    pub set: usize,
    /// Full block address.
    pub address: u64,
}

/// Bounded, fairness-evicting FIFO of recently missed blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReuseHistory {
    /// Oldest entry at the front.
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    cpus: usize,
    /// Default eviction target; advances on every eviction.
    rotation: usize,
}

impl ReuseHistory {
    /// Creates an empty history holding at most `capacity` entries from
    /// `cpus` applications.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `cpus` is zero.
    pub fn new(capacity: usize, cpus: usize) -> Self {
        assert!(capacity > 0, "reuse history capacity must be non-zero");
        assert!(cpus > 0, "reuse history needs at least one cpu");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cpus,
            rotation: 0,
        }
    }

    /// Maximum number of entries.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the history holds `capacity` entries.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// Current round-robin cursor.
    pub const fn rotation(&self) -> usize {
        self.rotation
    }

    /// Returns `true` if any entry carries `address`, in any set.
    pub fn contains(&self, address: u64) -> bool {
        self.entries.iter().any(|e| e.address == address)
    }

    /// Returns `true` if an entry matches both `set` and `address`.
    pub fn contains_block(&self, set: usize, address: u64) -> bool {
        self.entries
            .iter()
            .any(|e| e.set == set && e.address == address)
    }

    /// Number of entries recorded by `cpu`.
    pub fn count_of(&self, cpu: usize) -> usize {
        self.entries.iter().filter(|e| e.cpu == cpu).count()
    }

    /// Eviction score of `cpu`: its entry count minus the index of its oldest
    /// entry, or zero when that difference is not positive.
    pub fn score(&self, cpu: usize) -> usize {
        let first = self
            .entries
            .iter()
            .position(|e| e.cpu == cpu)
            .unwrap_or(self.entries.len());
        self.count_of(cpu).saturating_sub(first)
    }

    /// Appends `entry`, first evicting one entry if the history is full.
    ///
    /// Returns the evicted entry, if any. The length never exceeds capacity
    /// and is unchanged by a push that evicts.
    pub fn record(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        let evicted = if self.is_full() {
            self.evict()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Picks the application whose oldest entry leaves next.
    fn eviction_target(&mut self) -> usize {
        let start = self.rotation % self.cpus;
        self.rotation = (start + 1) % self.cpus;

        let mut target = start;
        let mut best = 0;
        for offset in 0..self.cpus {
            let cpu = (start + offset) % self.cpus;
            let score = self.score(cpu);
            if score > best {
                target = cpu;
                best = score;
            }
        }
        debug!(target, score = best, len = self.entries.len(), "reuse history eviction");
        target
    }

    fn evict(&mut self) -> Option<HistoryEntry> {
        let target = self.eviction_target();
        // The cursor may name an application with no entries left; the oldest
        // entry overall goes instead.
        match self.entries.iter().position(|e| e.cpu == target) {
            Some(pos) => self.entries.remove(pos),
            None => self.entries.pop_front(),
        }
    }
}
