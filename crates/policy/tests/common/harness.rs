use rripsim_policy::policies::DrripPolicy;
use rripsim_policy::{Access, AccessType, CacheLine, PolicyConfig, ReplacementPolicy, build};

/// Result of one harness access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub hit: bool,
    pub set: usize,
    pub way: usize,
    /// Whether `find_victim` ran (false for hits and invalid-way fills).
    pub searched: bool,
}

/// A tag array plus line slots, driven like a simulator host.
///
/// Block addresses map to set `address % sets`; use [`TestCache::address`] to
/// pick the `n`-th distinct block of a set.
pub struct TestCache<P: ReplacementPolicy + ?Sized = dyn ReplacementPolicy> {
    pub policy: Box<P>,
    pub lines: Vec<CacheLine>,
    tags: Vec<Option<u64>>,
    pub sets: usize,
    pub ways: usize,
}

/// Installs a test-writer subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl TestCache {
    pub fn new(config: &PolicyConfig) -> Self {
        Self::with_policy(build(config).unwrap(), config)
    }
}

impl TestCache<DrripPolicy> {
    /// A cache driven by a concrete DRRIP instance, for tests that inspect
    /// PSEL, the sampler, or the history.
    pub fn drrip(config: &PolicyConfig) -> Self {
        Self::with_policy(Box::new(DrripPolicy::new(config).unwrap()), config)
    }
}

impl<P: ReplacementPolicy + ?Sized> TestCache<P> {
    pub fn with_policy(policy: Box<P>, config: &PolicyConfig) -> Self {
        init_tracing();
        let mut lines = vec![CacheLine::default(); config.sets * config.ways];
        policy.initialize(&mut lines);
        Self {
            policy,
            lines,
            tags: vec![None; config.sets * config.ways],
            sets: config.sets,
            ways: config.ways,
        }
    }

    /// The `n`-th distinct block address mapping to `set`.
    pub fn address(&self, set: usize, n: u64) -> u64 {
        n * self.sets as u64 + set as u64
    }

    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        &self.lines[set * self.ways..(set + 1) * self.ways]
    }

    pub fn line(&self, set: usize, way: usize) -> CacheLine {
        self.lines[set * self.ways + way]
    }

    /// Way currently holding `address`, if resident.
    pub fn lookup(&self, address: u64) -> Option<usize> {
        let set = (address % self.sets as u64) as usize;
        (0..self.ways).find(|&way| self.tags[set * self.ways + way] == Some(address))
    }

    pub fn load(&mut self, cpu: usize, address: u64) -> Outcome {
        self.access(cpu, address, AccessType::Load)
    }

    pub fn access(&mut self, cpu: usize, address: u64, kind: AccessType) -> Outcome {
        let set = (address % self.sets as u64) as usize;
        let base = set * self.ways;
        let request = Access::load(cpu, set, address).with_kind(kind);

        if let Some(way) = self.lookup(address) {
            self.policy
                .update_state(&mut self.lines[base..base + self.ways], way, &request, true);
            return Outcome {
                hit: true,
                set,
                way,
                searched: false,
            };
        }

        let invalid = (0..self.ways).find(|&way| self.tags[base + way].is_none());
        let (way, searched) = match invalid {
            Some(way) => (way, false),
            None => {
                let way = self
                    .policy
                    .find_victim(&mut self.lines[base..base + self.ways], &request);
                assert!(way < self.ways, "victim way {way} out of range");
                (way, true)
            }
        };

        let victim = self.tags[base + way].unwrap_or(0);
        self.tags[base + way] = Some(address);
        self.policy.update_state(
            &mut self.lines[base..base + self.ways],
            way,
            &request.with_victim(victim),
            false,
        );
        Outcome {
            hit: false,
            set,
            way,
            searched,
        }
    }

    /// Fills every way of `set` with distinct blocks owned by `cpu`.
    pub fn warm_set(&mut self, cpu: usize, set: usize, first_block: u64) {
        for n in 0..self.ways as u64 {
            let address = self.address(set, first_block + n);
            let _ = self.load(cpu, address);
        }
    }

    /// Asserts the per-line bounds on every set.
    pub fn assert_bounds(&self, max_rrpv: u8) {
        for set in 0..self.sets {
            let lines = self.set_lines(set);
            let mut ranks: Vec<usize> = lines.iter().map(CacheLine::lru_rank).collect();
            ranks.sort_unstable();
            assert_eq!(ranks, (0..self.ways).collect::<Vec<_>>(), "set {set} ranks");
            assert!(
                lines.iter().all(|l| l.rrpv() <= max_rrpv),
                "set {set} rrpv above {max_rrpv}"
            );
        }
    }
}
