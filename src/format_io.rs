/// Output of per-read mapping results
///
/// Results are written in input read order, either as the plain text report
/// (`title start end` / `title No hit found`) or as PAF records for mapped reads.
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::paf::PafRecord;
use crate::read_mapper::ReadHit;
use crate::sequence::Sequence;

/// Text written for a read without a hit
pub const NO_HIT: &str = "No hit found";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per read: title and interval, or "No hit found"
    #[default]
    Text,
    /// PAF records for mapped reads only
    Paf,
}

/// Open the output file, or stdout when no path is given
pub fn open_output<P: AsRef<Path>>(path: Option<P>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let path = path.as_ref();
            let file = File::create(path)
                .with_context(|| format!("Failed to create output: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Write one entry per read; `results` is parallel to `reads`
pub fn write_results<W: Write>(
    out: &mut W,
    format: OutputFormat,
    reference: &Sequence,
    reads: &[Sequence],
    results: &[Option<ReadHit>],
) -> Result<()> {
    for (read, result) in reads.iter().zip(results) {
        match (format, result) {
            (OutputFormat::Text, Some(hit)) => writeln!(
                out,
                "{} {} {}",
                read.title, hit.interval.start, hit.interval.end
            )?,
            (OutputFormat::Text, None) => writeln!(out, "{} {}", read.title, NO_HIT)?,
            (OutputFormat::Paf, Some(hit)) => {
                writeln!(out, "{}", PafRecord::from_hit(read, reference, hit))?
            }
            (OutputFormat::Paf, None) => {}
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::MappedInterval;

    fn hit(start: usize, end: usize) -> ReadHit {
        ReadHit {
            interval: MappedInterval { start, end },
            identity: 1.0,
            coverage: 1.0,
            matches: end - start,
            alignment_length: end - start,
            query_start: 0,
            query_end: end - start,
            cigar: format!("{}=", end - start),
        }
    }

    #[test]
    fn test_text_output_keeps_read_order() {
        let reference = Sequence::new("chr1", "ACGTACGTTT");
        let reads = vec![Sequence::new("r1", "ACGT"), Sequence::new("r2", "GGGG")];
        let results = vec![Some(hit(0, 4)), None];

        let mut out = Vec::new();
        write_results(&mut out, OutputFormat::Text, &reference, &reads, &results).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "r1 0 4\nr2 No hit found\n");
    }

    #[test]
    fn test_paf_output_skips_unmapped() {
        let reference = Sequence::new("chr1", "ACGTACGTTT");
        let reads = vec![Sequence::new("r1", "GGGG"), Sequence::new("r2", "ACGT")];
        let results = vec![None, Some(hit(4, 8))];

        let mut out = Vec::new();
        write_results(&mut out, OutputFormat::Paf, &reference, &reads, &results).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("r2\t4\t0\t4\t+\tchr1\t10\t4\t8\t4\t4\t255"));
    }
}
