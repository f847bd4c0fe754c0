use crate::aligner::ScoringParams;
use crate::candidate::Thresholds;
use crate::coordinator::PartitionPolicy;

/// Default number of mapping workers
pub const DEFAULT_THREADS: usize = 2;

/// Configuration for a mapping run
///
/// Built once in `main` and shared read-only by every worker.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingConfig {
    pub scoring: ScoringParams,
    pub thresholds: Thresholds,
    /// Number of partitions and worker threads
    pub threads: usize,
    pub partition: PartitionPolicy,
}

impl Default for MappingConfig {
    fn default() -> Self {
        MappingConfig {
            scoring: ScoringParams::default(),
            thresholds: Thresholds::default(),
            threads: DEFAULT_THREADS,
            partition: PartitionPolicy::default(),
        }
    }
}
