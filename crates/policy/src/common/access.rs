//! Access descriptors.
//!
//! Every call into a policy carries an [`Access`]: who issued it, which set it
//! maps to, the block address, and what kind of access it is. Only
//! [`AccessType::Writeback`] changes insertion behavior; the other kinds are
//! carried for the host's benefit and for statistics.

use super::error::PolicyError;

/// Kind of memory access reaching the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessType {
    /// Demand load.
    #[default]
    Load,
    /// Read-for-ownership (demand store miss).
    Rfo,
    /// Hardware prefetch fill.
    Prefetch,
    /// Dirty eviction from an upper level.
    Writeback,
    /// Page-table walk access.
    Translation,
}

impl AccessType {
    /// Returns `true` for writebacks, which must not disturb recency rank.
    #[inline]
    pub const fn is_writeback(self) -> bool {
        matches!(self, Self::Writeback)
    }
}

impl TryFrom<u8> for AccessType {
    type Error = PolicyError;

    /// Decodes the raw type codes used by trace-driven hosts (0..=4).
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Load),
            1 => Ok(Self::Rfo),
            2 => Ok(Self::Prefetch),
            3 => Ok(Self::Writeback),
            4 => Ok(Self::Translation),
            other => Err(PolicyError::UnknownAccessType(other)),
        }
    }
}

/// One access as seen by the replacement engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    /// Issuing CPU (application id).
    pub cpu: usize,
    /// Instruction id of the triggering instruction.
    pub instr_id: u64,
    /// Set index the address maps to.
    pub set: usize,
    /// Full block address.
    pub address: u64,
    /// Program counter of the triggering instruction.
    pub ip: u64,
    /// Address of the block being replaced on a fill (0 if none).
    pub victim_address: u64,
    /// Access kind.
    pub kind: AccessType,
}

impl Access {
    /// Creates a demand load from `cpu` to `address` in `set`.
    pub const fn load(cpu: usize, set: usize, address: u64) -> Self {
        Self {
            cpu,
            instr_id: 0,
            set,
            address,
            ip: 0,
            victim_address: 0,
            kind: AccessType::Load,
        }
    }

    /// Creates a writeback from `cpu` to `address` in `set`.
    pub const fn writeback(cpu: usize, set: usize, address: u64) -> Self {
        Self {
            kind: AccessType::Writeback,
            ..Self::load(cpu, set, address)
        }
    }

    /// Returns a copy with a different access kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: AccessType) -> Self {
        self.kind = kind;
        self
    }

    /// Returns a copy carrying the address of the block being replaced.
    #[must_use]
    pub const fn with_victim(mut self, victim_address: u64) -> Self {
        self.victim_address = victim_address;
        self
    }
}
