//! Parallel mapping of a read set
//!
//! Reads are split into contiguous partitions, one `ChunkWorker` maps each
//! partition on a dedicated rayon pool, and the per-worker `ReadStats` are
//! summed once every worker has finished. Result slots are split into disjoint
//! mutable slices before launch, so workers share nothing mutable.

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::ops::Range;
use std::time::Instant;

use crate::aligner::LocalAligner;
use crate::config::MappingConfig;
use crate::read_mapper::{ReadHit, ReadMapper, ReadStats};
use crate::seed_index::SeedIndex;
use crate::sequence::Sequence;
use crate::summary::SummaryStats;

/// How reads past the last even-sized partition are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartitionPolicy {
    /// Every partition holds `read_count / threads` reads; the
    /// `read_count % threads` trailing reads are not mapped and report as
    /// unmapped
    #[default]
    DropRemainder,
    /// The last partition extends to the end of the read set
    ExtendLast,
}

/// Contiguous read ranges, one per worker
///
/// Partition `i` starts at `i * (read_count / threads)`. `threads` must be
/// non-zero.
pub fn partition_reads(
    read_count: usize,
    threads: usize,
    policy: PartitionPolicy,
) -> Vec<Range<usize>> {
    debug_assert!(threads > 0);
    let chunk = read_count / threads;

    let mut ranges: Vec<Range<usize>> = (0..threads)
        .map(|i| i * chunk..(i + 1) * chunk)
        .collect();
    if policy == PartitionPolicy::ExtendLast {
        if let Some(last) = ranges.last_mut() {
            last.end = read_count;
        }
    }
    ranges
}

/// Split `slots` into one mutable slice per range
///
/// Ranges must be contiguous and start at 0; slots past the last range are
/// left out.
fn split_slots<'s, T>(mut slots: &'s mut [T], ranges: &[Range<usize>]) -> Vec<&'s mut [T]> {
    let mut chunks = Vec::with_capacity(ranges.len());
    let mut consumed = 0;
    for range in ranges {
        debug_assert_eq!(range.start, consumed);
        let (chunk, rest) = std::mem::take(&mut slots).split_at_mut(range.len());
        chunks.push(chunk);
        slots = rest;
        consumed = range.end;
    }
    chunks
}

/// Maps one contiguous partition of the read set
pub struct ChunkWorker<'m, 'a, I: SeedIndex, A: LocalAligner> {
    mapper: &'m ReadMapper<'a, I, A>,
    range: Range<usize>,
}

impl<'m, 'a, I: SeedIndex, A: LocalAligner> ChunkWorker<'m, 'a, I, A> {
    pub fn new(mapper: &'m ReadMapper<'a, I, A>, range: Range<usize>) -> Self {
        ChunkWorker { mapper, range }
    }

    /// Map `reads[range]` in index order into `slots`, which covers exactly
    /// this worker's range
    pub fn run(&self, reads: &[Sequence], slots: &mut [Option<ReadHit>]) -> ReadStats {
        debug_assert_eq!(slots.len(), self.range.len());
        let mut stats = ReadStats::default();

        for (read, slot) in reads[self.range.clone()].iter().zip(slots.iter_mut()) {
            *slot = self.mapper.map_read(read, &mut stats);
        }

        stats
    }
}

/// Output of a mapping run
#[derive(Debug, Clone)]
pub struct MappingRun {
    /// One slot per read, in input order; `None` is unmapped
    pub results: Vec<Option<ReadHit>>,
    /// Read ranges handed to the workers
    pub partitions: Vec<Range<usize>>,
    /// Stats of each worker, in partition order
    pub worker_stats: Vec<ReadStats>,
    pub summary: SummaryStats,
}

impl MappingRun {
    /// Number of reads not covered by any partition
    pub fn unprocessed_reads(&self) -> usize {
        let covered = self.partitions.last().map_or(0, |range| range.end);
        self.results.len() - covered
    }
}

/// Partitions reads, runs the workers and merges their statistics
pub struct MappingCoordinator<'a, I: SeedIndex, A: LocalAligner> {
    mapper: ReadMapper<'a, I, A>,
    config: &'a MappingConfig,
}

impl<'a, I: SeedIndex, A: LocalAligner> MappingCoordinator<'a, I, A> {
    pub fn new(
        reference: &'a Sequence,
        index: &'a I,
        aligner: &'a A,
        config: &'a MappingConfig,
    ) -> Self {
        MappingCoordinator {
            mapper: ReadMapper::new(reference, index, aligner, config),
            config,
        }
    }

    pub fn map_reads(&self, reads: &[Sequence]) -> Result<MappingRun> {
        let threads = self.config.threads;
        if threads == 0 {
            bail!("Thread count must be at least 1");
        }
        self.config.scoring.validate()?;

        let partitions = partition_reads(reads.len(), threads, self.config.partition);
        log::debug!("Partitions: {:?}", partitions);

        let covered = partitions.last().map_or(0, |range| range.end);
        if covered < reads.len() {
            log::warn!(
                "{} trailing reads are not divisible across {} workers and will not be mapped",
                reads.len() - covered,
                threads
            );
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build mapping thread pool")?;

        let mut results: Vec<Option<ReadHit>> = vec![None; reads.len()];
        let started = Instant::now();

        let worker_stats: Vec<ReadStats> = {
            let chunks = split_slots(&mut results, &partitions);
            // collect() returns only after every worker has finished
            pool.install(|| {
                partitions
                    .par_iter()
                    .zip(chunks.into_par_iter())
                    .map(|(range, slots)| {
                        ChunkWorker::new(&self.mapper, range.clone()).run(reads, slots)
                    })
                    .collect()
            })
        };

        log::debug!(
            "Mapped {} reads with {} workers in {:.3}s",
            covered,
            threads,
            started.elapsed().as_secs_f64()
        );

        let merged: ReadStats = worker_stats.iter().copied().sum();
        let mapped = results.iter().filter(|hit| hit.is_some()).count() as u64;
        let summary = SummaryStats::new(reads.len() as u64, mapped, merged);

        Ok(MappingRun {
            results,
            partitions,
            worker_stats,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_even() {
        let ranges = partition_reads(10, 2, PartitionPolicy::DropRemainder);
        assert_eq!(ranges, vec![0..5, 5..10]);
    }

    #[test]
    fn test_partition_drops_remainder() {
        let ranges = partition_reads(11, 3, PartitionPolicy::DropRemainder);
        assert_eq!(ranges, vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn test_partition_extend_last() {
        let ranges = partition_reads(11, 3, PartitionPolicy::ExtendLast);
        assert_eq!(ranges, vec![0..3, 3..6, 6..11]);
    }

    #[test]
    fn test_more_threads_than_reads() {
        let ranges = partition_reads(1, 2, PartitionPolicy::DropRemainder);
        assert_eq!(ranges, vec![0..0, 0..0]);
        let ranges = partition_reads(1, 2, PartitionPolicy::ExtendLast);
        assert_eq!(ranges, vec![0..0, 0..1]);
    }

    #[test]
    fn test_split_slots() {
        let mut slots = vec![0u8; 7];
        let ranges = partition_reads(7, 3, PartitionPolicy::DropRemainder);
        let chunks = split_slots(&mut slots, &ranges);

        assert_eq!(chunks.len(), 3);
        for (i, chunk) in chunks.into_iter().enumerate() {
            assert_eq!(chunk.len(), 2);
            chunk.fill(i as u8 + 1);
        }
        assert_eq!(slots, vec![1, 1, 2, 2, 3, 3, 0]);
    }
}
