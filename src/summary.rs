/// Aggregate statistics of a mapping run
use std::fmt;

use crate::read_mapper::ReadStats;

/// Read-only summary derived after all workers have joined
///
/// Ratios are `None` when their denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub read_count: u64,
    /// Reads with a hit in the final results
    pub mapped: u64,
    /// Merged per-worker counters
    pub stats: ReadStats,
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

impl SummaryStats {
    pub fn new(read_count: u64, mapped: u64, stats: ReadStats) -> Self {
        SummaryStats {
            read_count,
            mapped,
            stats,
        }
    }

    /// Fraction of reads with a hit
    pub fn hit_rate(&self) -> Option<f64> {
        ratio(self.mapped, self.read_count)
    }

    /// Alignments per read over all reads
    pub fn avg_alignments_per_read(&self) -> Option<f64> {
        ratio(self.stats.alignments_attempted, self.read_count)
    }

    /// Alignments per read over reads with at least one seed
    pub fn avg_alignments_per_seeded_read(&self) -> Option<f64> {
        ratio(self.stats.alignments_attempted, self.stats.reads_seeded)
    }
}

struct Undefined(Option<f64>);

impl fmt::Display for Undefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.6}", value),
            None => write!(f, "undefined"),
        }
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "hit rate = {}% ( {} / {} )",
            Undefined(self.hit_rate().map(|rate| 100.0 * rate)),
            self.mapped,
            self.read_count
        )?;
        writeln!(
            f,
            "average alignments per read (total): {}",
            Undefined(self.avg_alignments_per_read())
        )?;
        write!(
            f,
            "average alignments per read: {} ( {} / {} )",
            Undefined(self.avg_alignments_per_seeded_read()),
            self.stats.alignments_attempted,
            self.stats.reads_seeded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios() {
        let stats = ReadStats {
            alignments_attempted: 6,
            reads_seeded: 3,
            reads_mapped: 2,
        };
        let summary = SummaryStats::new(4, 2, stats);

        assert_eq!(summary.hit_rate(), Some(0.5));
        assert_eq!(summary.avg_alignments_per_read(), Some(1.5));
        assert_eq!(summary.avg_alignments_per_seeded_read(), Some(2.0));
    }

    #[test]
    fn test_zero_denominators_are_undefined() {
        let summary = SummaryStats::new(0, 0, ReadStats::default());
        assert_eq!(summary.hit_rate(), None);
        assert_eq!(summary.avg_alignments_per_read(), None);
        assert_eq!(summary.avg_alignments_per_seeded_read(), None);

        let report = summary.to_string();
        assert!(report.contains("hit rate = undefined% ( 0 / 0 )"));
        assert!(report.contains("average alignments per read: undefined ( 0 / 0 )"));
    }

    #[test]
    fn test_report_format() {
        let stats = ReadStats {
            alignments_attempted: 3,
            reads_seeded: 2,
            reads_mapped: 1,
        };
        let report = SummaryStats::new(2, 1, stats).to_string();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "hit rate = 50.000000% ( 1 / 2 )");
        assert_eq!(lines[1], "average alignments per read (total): 1.500000");
        assert_eq!(lines[2], "average alignments per read: 1.500000 ( 3 / 2 )");
    }
}
