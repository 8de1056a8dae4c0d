//! Record allocator for unique VLAN batches
//!
//! This module contains the RecordAllocator that turns a seeded stream of
//! random draws into a batch of records with pairwise-distinct VLAN IDs and
//! networks, or a terminal exhaustion error.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::catalog::DepartmentCatalog;
use crate::generation::error::{GeneratorResult, VlanError, VlanErrorKind};
use crate::generation::progress::{NoopProgress, ProgressSink};
use crate::generation::record::{
    VlanRecord, DEFAULT_VLAN_ID_MIN, VLAN_ID_MAX, VLAN_ID_MIN, WAN_MAX, WAN_MIN,
};
use crate::generation::statistics::GenerationStatistics;
use crate::network::{random_prefix, ClassSelector, NetworkPrefix};
use crate::types::{AddressClass, ClassPolicy, GeneratorConfig};

/// Lower bound on consecutive collisions tolerated for one record
pub const MIN_RETRY_BUDGET: u64 = 1000;

/// Multiple of the expected draws per record allowed before giving up.
/// A record fails spuriously with probability about `e^-RETRY_FACTOR`.
pub const RETRY_FACTOR: f64 = 32.0;

/// Consecutive collisions tolerated for one record, given the chance that a
/// fresh VLAN ID and a fresh network are each still unused.
///
/// A candidate is kept only when both fields are free, so the expected number
/// of draws is the product of the two inverse free fractions.
pub fn retry_budget(vlan_free: f64, network_free: f64) -> u64 {
    let hit = vlan_free * network_free;
    if hit <= 0.0 {
        return MIN_RETRY_BUDGET;
    }
    // float to int casts saturate
    MIN_RETRY_BUDGET.max((RETRY_FACTOR / hit).ceil() as u64)
}

/// Dedup state owned by one generation call
#[derive(Debug)]
struct GenerationSession {
    vlan_ids: HashSet<u16>,
    networks: HashSet<NetworkPrefix>,
    per_class: [usize; 3],
    records: Vec<VlanRecord>,
}

impl GenerationSession {
    fn new(count: usize) -> Self {
        Self {
            vlan_ids: HashSet::with_capacity(count),
            networks: HashSet::with_capacity(count),
            per_class: [0; 3],
            records: Vec::with_capacity(count),
        }
    }

    /// Returns which unique fields of `candidate` are already taken
    fn collisions(&self, candidate: &VlanRecord) -> (bool, bool) {
        (self.vlan_ids.contains(&candidate.vlan_id), self.networks.contains(&candidate.network))
    }

    fn accept(&mut self, record: VlanRecord, class: AddressClass) {
        self.per_class[class.index()] += 1;
        self.vlan_ids.insert(record.vlan_id);
        self.networks.insert(record.network);
        self.records.push(record);
    }
}

/// Generates batches of unique VLAN records from a seed
///
/// Each call to [`RecordAllocator::generate`] re-seeds a fresh
/// [`ChaCha8Rng`], so the same allocator settings always yield the same
/// ordered records. Per attempt the draws happen in a fixed order: VLAN ID,
/// class, prefix octets, department, WAN index. A candidate colliding on
/// either unique field is discarded whole and redrawn.
#[derive(Debug, Clone)]
pub struct RecordAllocator {
    count: usize,
    seed: u64,
    vlan_min: u16,
    vlan_max: u16,
    class_policy: ClassPolicy,
    catalog: DepartmentCatalog,
    statistics: GenerationStatistics,
}

impl RecordAllocator {
    /// Create an allocator for `count` records over the default VLAN range
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            vlan_min: DEFAULT_VLAN_ID_MIN,
            vlan_max: VLAN_ID_MAX,
            class_policy: ClassPolicy::default(),
            catalog: DepartmentCatalog::standard(),
            statistics: GenerationStatistics::new(count, seed),
        }
    }

    /// Create an allocator from a validated configuration and a concrete seed
    pub fn from_config(config: &GeneratorConfig, seed: u64) -> Self {
        Self::new(config.count, seed)
            .with_vlan_range(config.vlan_id_min, config.vlan_id_max)
            .with_class_policy(config.class_policy)
    }

    /// Restrict VLAN IDs to `min..=max`
    pub fn with_vlan_range(mut self, min: u16, max: u16) -> Self {
        self.vlan_min = min;
        self.vlan_max = max;
        self
    }

    /// Choose how the class of each network is picked
    pub fn with_class_policy(mut self, policy: ClassPolicy) -> Self {
        self.class_policy = policy;
        self
    }

    /// Substitute the department catalog
    pub fn with_catalog(mut self, catalog: DepartmentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Number of records requested
    pub fn count(&self) -> usize {
        self.count
    }

    /// Seed used by [`RecordAllocator::generate`]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Statistics of the most recent run
    pub fn statistics(&self) -> &GenerationStatistics {
        &self.statistics
    }

    /// Number of distinct VLAN IDs in the configured range
    pub fn vlan_space(&self) -> usize {
        if self.vlan_min > self.vlan_max {
            0
        } else {
            usize::from(self.vlan_max - self.vlan_min) + 1
        }
    }

    /// Number of distinct networks reachable under the class policy
    pub fn network_space(&self) -> usize {
        ClassSelector::new(self.class_policy).map(|s| s.network_capacity()).unwrap_or(0)
    }


    /// Generate the batch from the allocator's own seed
    pub fn generate(&mut self) -> GeneratorResult<Vec<VlanRecord>> {
        self.generate_with_progress(&mut NoopProgress)
    }

    /// Generate the batch from the allocator's own seed, reporting progress
    pub fn generate_with_progress(
        &mut self,
        progress: &mut dyn ProgressSink,
    ) -> GeneratorResult<Vec<VlanRecord>> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.generate_from(&mut rng, progress)
    }

    /// Generate the batch drawing from a caller-supplied random source
    #[instrument(skip(self, rng, progress), fields(count = self.count, seed = self.seed))]
    pub fn generate_from<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        progress: &mut dyn ProgressSink,
    ) -> GeneratorResult<Vec<VlanRecord>> {
        self.statistics = GenerationStatistics::new(self.count, self.seed);
        let selector = self.validate()?;
        self.check_capacity(&selector)?;

        info!(
            "Generating {} VLAN records in range {}-{} with class policy {}",
            self.count, self.vlan_min, self.vlan_max, self.class_policy
        );

        let start_time = Instant::now();
        let mut session = GenerationSession::new(self.count);
        progress.on_start(self.count);

        while session.records.len() < self.count {
            let index = session.records.len();
            if let Err(err) = self.allocate_one(index, &selector, &mut session, rng) {
                progress.on_finish(session.records.len(), self.count);
                self.statistics.set_duration(start_time.elapsed());
                return Err(err.into());
            }
            progress.on_record(session.records.len(), self.count);
        }

        progress.on_finish(session.records.len(), self.count);
        self.statistics.set_duration(start_time.elapsed());
        info!("{}", self.statistics.compact_summary());

        Ok(session.records)
    }

    /// Draw until one candidate fits or the retry budget runs out
    fn allocate_one<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        selector: &ClassSelector,
        session: &mut GenerationSession,
        rng: &mut R,
    ) -> Result<(), VlanError> {
        let vlan_space = self.vlan_space();
        let vlan_free = vlan_space.saturating_sub(session.records.len()) as f64 / vlan_space as f64;
        let budget = retry_budget(vlan_free, selector.free_fraction(index, &session.per_class));

        let mut collisions: u64 = 0;
        let mut vlan_hits: u64 = 0;
        let mut network_hits: u64 = 0;
        loop {
            self.statistics.record_attempt();
            let (candidate, class) = self.draw(index, selector, rng);
            let (vlan_taken, network_taken) = session.collisions(&candidate);

            if !vlan_taken && !network_taken {
                self.statistics.record_accepted(class);
                session.accept(candidate, class);
                return Ok(());
            }

            self.statistics.record_collision(vlan_taken, network_taken);
            collisions += 1;
            vlan_hits += u64::from(vlan_taken);
            network_hits += u64::from(network_taken);
            debug!(
                record = index,
                vlan_id = candidate.vlan_id,
                network = %candidate.network,
                vlan_taken,
                network_taken,
                "Candidate collided, redrawing"
            );

            if collisions > budget {
                return Err(self.exhausted(index, collisions, vlan_hits, network_hits));
            }
        }
    }

    /// Exhaustion error naming the field that kept colliding, or both
    fn exhausted(&self, index: usize, collisions: u64, vlan_hits: u64, network_hits: u64) -> VlanError {
        let half = collisions / 2;
        let field = match (vlan_hits > half, network_hits > half) {
            (true, true) => "vlan_id,network",
            (true, false) => "vlan_id",
            (false, true) => "network",
            (false, false) if vlan_hits >= network_hits => "vlan_id",
            (false, false) => "network",
        };
        VlanError::exhausted(
            field,
            format!(
                "cannot generate {} unique VLANs in range {}-{} with class policy {}: \
                 record {} collided {} times in a row ({} on VLAN ID, {} on network)",
                self.count,
                self.vlan_min,
                self.vlan_max,
                self.class_policy,
                index,
                collisions,
                vlan_hits,
                network_hits
            ),
        )
    }

    /// One candidate tuple; draw order is part of the determinism contract
    fn draw<R: Rng + ?Sized>(
        &self,
        index: usize,
        selector: &ClassSelector,
        rng: &mut R,
    ) -> (VlanRecord, AddressClass) {
        let vlan_id = rng.gen_range(self.vlan_min..=self.vlan_max);
        let class = selector.select(index, rng);
        let network = random_prefix(class, rng);
        let department = self.catalog.pick(rng).clone();
        let wan_assignment = rng.gen_range(WAN_MIN..=WAN_MAX);

        (VlanRecord { vlan_id, network, department, wan_assignment }, class)
    }

    fn validate(&self) -> Result<ClassSelector, VlanError> {
        if self.count == 0 {
            return Err(VlanError::new(
                None,
                "count",
                VlanErrorKind::Invalid,
                "count must be greater than 0",
            ));
        }
        if self.vlan_min < VLAN_ID_MIN || self.vlan_max > VLAN_ID_MAX || self.vlan_min > self.vlan_max
        {
            return Err(VlanError::new(
                None,
                "vlan_id",
                VlanErrorKind::OutOfRange,
                format!(
                    "VLAN range {}-{} must satisfy {} <= min <= max <= {}",
                    self.vlan_min, self.vlan_max, VLAN_ID_MIN, VLAN_ID_MAX
                ),
            ));
        }
        ClassSelector::new(self.class_policy)
    }

    /// Fail before drawing when the batch cannot fit
    fn check_capacity(&self, selector: &ClassSelector) -> Result<(), VlanError> {
        let vlan_space = self.vlan_space();
        if self.count > vlan_space {
            return Err(VlanError::exhausted(
                "vlan_id",
                format!(
                    "cannot generate {} unique VLANs in range {}-{} ({} IDs available)",
                    self.count, self.vlan_min, self.vlan_max, vlan_space
                ),
            ));
        }

        let network_space = selector.network_capacity();
        if self.count > network_space {
            return Err(VlanError::exhausted(
                "network",
                format!(
                    "cannot generate {} unique networks with class policy {} ({} /24 prefixes available)",
                    self.count, self.class_policy, network_space
                ),
            ));
        }
        Ok(())
    }
}
