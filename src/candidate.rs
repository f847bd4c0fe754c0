//! Candidate evaluation: align one window and decide whether it qualifies

use crate::aligner::{AlignmentResult, LocalAligner, ScoringParams};
use crate::window::AlignmentWindow;

/// Minimum identity (exclusive) for an accepted candidate
pub const MIN_IDENTITY: f64 = 0.90;

/// Minimum coverage (exclusive) for an accepted candidate
pub const MIN_COVERAGE: f64 = 0.80;

/// Acceptance thresholds; both comparisons are strict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_identity: f64,
    pub min_coverage: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_identity: MIN_IDENTITY,
            min_coverage: MIN_COVERAGE,
        }
    }
}

/// Half-open interval of the reference, `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappedInterval {
    pub start: usize,
    pub end: usize,
}

/// One aligned window with its derived scores
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub window: AlignmentWindow,
    pub alignment: AlignmentResult,
    pub identity: f64,
    pub coverage: f64,
}

impl Candidate {
    /// Derive identity and coverage; `None` for an empty alignment
    pub fn from_alignment(
        window: AlignmentWindow,
        alignment: AlignmentResult,
        read_len: usize,
    ) -> Option<Self> {
        let alignment_length = alignment.alignment_length();
        if alignment_length == 0 {
            return None;
        }

        let identity = alignment.matches as f64 / alignment_length as f64;
        let coverage = read_len as f64 / alignment_length as f64;

        Some(Candidate {
            window,
            alignment,
            identity,
            coverage,
        })
    }

    pub fn is_accepted(&self, thresholds: &Thresholds) -> bool {
        self.identity > thresholds.min_identity && self.coverage > thresholds.min_coverage
    }

    /// Aligned span in reference coordinates
    pub fn mapped_interval(&self) -> MappedInterval {
        MappedInterval {
            start: self.window.start + self.alignment.local_min,
            end: self.window.start + self.alignment.local_max,
        }
    }
}

/// Aligns reads against windows with fixed scoring and thresholds
pub struct CandidateEvaluator<'a, A: LocalAligner> {
    aligner: &'a A,
    scoring: &'a ScoringParams,
    thresholds: Thresholds,
}

impl<'a, A: LocalAligner> CandidateEvaluator<'a, A> {
    pub fn new(aligner: &'a A, scoring: &'a ScoringParams, thresholds: Thresholds) -> Self {
        CandidateEvaluator {
            aligner,
            scoring,
            thresholds,
        }
    }

    /// Align `read` against `window` of `reference`
    ///
    /// Returns the scored candidate whether or not it passes the thresholds;
    /// `None` only when the alignment is empty.
    pub fn evaluate(
        &self,
        reference: &[u8],
        window: AlignmentWindow,
        read: &[u8],
    ) -> Option<Candidate> {
        let alignment = self
            .aligner
            .align(window.slice(reference), read, self.scoring);
        Candidate::from_alignment(window, alignment, read.len())
    }

    /// Like `evaluate`, keeping only accepted candidates
    pub fn evaluate_accepted(
        &self,
        reference: &[u8],
        window: AlignmentWindow,
        read: &[u8],
    ) -> Option<Candidate> {
        self.evaluate(reference, window, read)
            .filter(|candidate| candidate.is_accepted(&self.thresholds))
    }
}
