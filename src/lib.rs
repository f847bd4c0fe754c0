// Library exports for readmap
pub mod aligner;
pub mod candidate;
pub mod config;
pub mod coordinator;
pub mod format_io;
pub mod paf;
pub mod read_mapper;
pub mod seed_index;
pub mod sequence;
pub mod summary;
pub mod window;

pub use aligner::{AlignmentResult, LocalAligner, ScoringParams, SmithWaterman};
pub use candidate::{Candidate, CandidateEvaluator, MappedInterval, Thresholds};
pub use config::MappingConfig;
pub use coordinator::{
    partition_reads, ChunkWorker, MappingCoordinator, MappingRun, PartitionPolicy,
};
pub use read_mapper::{ReadHit, ReadMapper, ReadStats};
pub use seed_index::{SeedIndex, SuffixArrayIndex};
pub use sequence::Sequence;
pub use summary::SummaryStats;
pub use window::AlignmentWindow;
