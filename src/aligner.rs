//! Local alignment of a read against a reference window
//!
//! The mapper only needs the counts and the aligned span of a local alignment,
//! so the aligner is a trait. `SmithWaterman` is the affine-gap implementation
//! backed by `bio::alignment::pairwise`.

use anyhow::{bail, Result};
use bio::alignment::pairwise::{Aligner, Scoring};
use bio::alignment::AlignmentOperation;

/// Scoring parameters shared read-only by every alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringParams {
    /// Reward for identical symbols
    pub match_score: i32,
    /// Penalty for substitutions
    pub mismatch: i32,
    /// Gap-open penalty
    pub gap_open: i32,
    /// Gap-extend penalty
    pub gap_extend: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        ScoringParams {
            match_score: 1,
            mismatch: -2,
            gap_open: -5,
            gap_extend: -1,
        }
    }
}

impl ScoringParams {
    /// Gap scores are penalties and must not be positive
    pub fn validate(&self) -> Result<()> {
        if self.gap_open > 0 {
            bail!("Gap-open score must not be positive (got {})", self.gap_open);
        }
        if self.gap_extend > 0 {
            bail!(
                "Gap-extend score must not be positive (got {})",
                self.gap_extend
            );
        }
        Ok(())
    }
}

/// Result of aligning a read against a window
///
/// `local_min`/`local_max` delimit the aligned span of the window (end
/// exclusive), `query_start`/`query_end` the aligned span of the read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentResult {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
    pub local_min: usize,
    pub local_max: usize,
    pub query_start: usize,
    pub query_end: usize,
    /// Extended CIGAR (`=`, `X`, `I`, `D`), read against window
    pub cigar: String,
}

impl AlignmentResult {
    /// Number of alignment columns
    pub fn alignment_length(&self) -> usize {
        self.matches + self.mismatches + self.gaps
    }
}

/// Local aligner collaborator
pub trait LocalAligner: Sync {
    fn align(&self, window: &[u8], read: &[u8], scoring: &ScoringParams) -> AlignmentResult;
}

/// Affine-gap Smith-Waterman
#[derive(Debug, Clone, Copy, Default)]
pub struct SmithWaterman;

impl LocalAligner for SmithWaterman {
    fn align(&self, window: &[u8], read: &[u8], scoring: &ScoringParams) -> AlignmentResult {
        if window.is_empty() || read.is_empty() {
            return AlignmentResult::default();
        }

        let scoring = Scoring::from_scores(
            scoring.gap_open,
            scoring.gap_extend,
            scoring.match_score,
            scoring.mismatch,
        );
        let mut aligner = Aligner::with_scoring(scoring);
        // x is the window, y is the read
        let alignment = aligner.local(window, read);

        let mut result = AlignmentResult {
            local_min: alignment.xstart,
            local_max: alignment.xend,
            query_start: alignment.ystart,
            query_end: alignment.yend,
            ..Default::default()
        };

        let mut cigar = CigarBuilder::default();
        for op in &alignment.operations {
            match op {
                AlignmentOperation::Match => {
                    result.matches += 1;
                    cigar.push('=');
                }
                AlignmentOperation::Subst => {
                    result.mismatches += 1;
                    cigar.push('X');
                }
                // Read base with no window counterpart
                AlignmentOperation::Del => {
                    result.gaps += 1;
                    cigar.push('I');
                }
                // Window base skipped by the read
                AlignmentOperation::Ins => {
                    result.gaps += 1;
                    cigar.push('D');
                }
                AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {}
            }
        }
        result.cigar = cigar.finish();

        result
    }
}

/// Run-length encoder for CIGAR operations
#[derive(Default)]
struct CigarBuilder {
    out: String,
    op: Option<char>,
    count: usize,
}

impl CigarBuilder {
    fn push(&mut self, op: char) {
        if self.op == Some(op) {
            self.count += 1;
        } else {
            self.flush();
            self.op = Some(op);
            self.count = 1;
        }
    }

    fn flush(&mut self) {
        if let Some(op) = self.op {
            self.out.push_str(&format!("{}{}", self.count, op));
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.out
    }
}
