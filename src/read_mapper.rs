//! Mapping of a single read: seeds, windows, candidates, best hit

use std::iter::Sum;
use std::ops::AddAssign;

use crate::aligner::LocalAligner;
use crate::candidate::{Candidate, CandidateEvaluator, MappedInterval};
use crate::config::MappingConfig;
use crate::seed_index::SeedIndex;
use crate::sequence::Sequence;
use crate::window::AlignmentWindow;

/// Counters owned by one worker, merged by summation after the join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Candidates evaluated, accepted or not
    pub alignments_attempted: u64,
    /// Reads with at least one seed offset
    pub reads_seeded: u64,
    pub reads_mapped: u64,
}

impl AddAssign for ReadStats {
    fn add_assign(&mut self, other: Self) {
        self.alignments_attempted += other.alignments_attempted;
        self.reads_seeded += other.reads_seeded;
        self.reads_mapped += other.reads_mapped;
    }
}

impl Sum for ReadStats {
    fn sum<I: Iterator<Item = ReadStats>>(iter: I) -> Self {
        iter.fold(ReadStats::default(), |mut total, stats| {
            total += stats;
            total
        })
    }
}

/// Accepted mapping of a read
#[derive(Debug, Clone, PartialEq)]
pub struct ReadHit {
    pub interval: MappedInterval,
    pub identity: f64,
    pub coverage: f64,
    pub matches: usize,
    pub alignment_length: usize,
    pub query_start: usize,
    pub query_end: usize,
    pub cigar: String,
}

impl From<Candidate> for ReadHit {
    fn from(candidate: Candidate) -> Self {
        ReadHit {
            interval: candidate.mapped_interval(),
            identity: candidate.identity,
            coverage: candidate.coverage,
            matches: candidate.alignment.matches,
            alignment_length: candidate.alignment.alignment_length(),
            query_start: candidate.alignment.query_start,
            query_end: candidate.alignment.query_end,
            cigar: candidate.alignment.cigar,
        }
    }
}

/// Maps reads against one reference with a shared index and aligner
pub struct ReadMapper<'a, I: SeedIndex, A: LocalAligner> {
    reference: &'a Sequence,
    index: &'a I,
    evaluator: CandidateEvaluator<'a, A>,
}

impl<'a, I: SeedIndex, A: LocalAligner> ReadMapper<'a, I, A> {
    pub fn new(
        reference: &'a Sequence,
        index: &'a I,
        aligner: &'a A,
        config: &'a MappingConfig,
    ) -> Self {
        ReadMapper {
            reference,
            index,
            evaluator: CandidateEvaluator::new(aligner, &config.scoring, config.thresholds),
        }
    }

    /// Map one read, updating `stats`
    ///
    /// Candidates are evaluated in seed order; a later candidate replaces the
    /// current best only with strictly greater coverage.
    pub fn map_read(&self, read: &Sequence, stats: &mut ReadStats) -> Option<ReadHit> {
        let seeds = self.index.lookup(&read.content);
        if seeds.is_empty() {
            return None;
        }
        stats.reads_seeded += 1;

        let reference = &self.reference.content;
        let mut best: Option<Candidate> = None;

        for seed in seeds {
            let window = AlignmentWindow::around_seed(seed, read.len(), reference.len());
            stats.alignments_attempted += 1;

            let Some(candidate) = self
                .evaluator
                .evaluate_accepted(reference, window, &read.content)
            else {
                continue;
            };

            let improves = best
                .as_ref()
                .map_or(true, |current| candidate.coverage > current.coverage);
            if improves {
                best = Some(candidate);
            }
        }

        let hit = best.map(ReadHit::from);
        if hit.is_some() {
            stats.reads_mapped += 1;
        }
        hit
    }
}
