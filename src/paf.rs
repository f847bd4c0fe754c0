use std::fmt;

use crate::read_mapper::ReadHit;
use crate::sequence::Sequence;

/// Mapping quality written for every record; PAF uses 255 for "missing"
pub const MAPQ_UNAVAILABLE: u8 = 255;

/// PAF record structure
#[derive(Debug, Clone, PartialEq)]
pub struct PafRecord {
    pub query_name: String,
    pub query_len: usize,
    pub query_start: usize,
    pub query_end: usize,
    pub strand: char,
    pub ref_name: String,
    pub ref_len: usize,
    pub ref_start: usize,
    pub ref_end: usize,
    pub matches: usize,
    pub block_len: usize,
    pub quality: u8,
    pub tags: Vec<(String, String)>,
    pub cigar: Option<String>,
}

impl PafRecord {
    /// Build the record for a mapped read
    pub fn from_hit(read: &Sequence, reference: &Sequence, hit: &ReadHit) -> Self {
        PafRecord {
            query_name: read.title.clone(),
            query_len: read.len(),
            query_start: hit.query_start,
            query_end: hit.query_end,
            strand: '+',
            ref_name: reference.title.clone(),
            ref_len: reference.len(),
            ref_start: hit.interval.start,
            ref_end: hit.interval.end,
            matches: hit.matches,
            block_len: hit.alignment_length,
            quality: MAPQ_UNAVAILABLE,
            tags: vec![
                ("id".to_string(), format!("f:{:.4}", hit.identity)),
                ("cv".to_string(), format!("f:{:.4}", hit.coverage)),
            ],
            cigar: (!hit.cigar.is_empty()).then(|| hit.cigar.clone()),
        }
    }
}

impl fmt::Display for PafRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.query_name,
            self.query_len,
            self.query_start,
            self.query_end,
            self.strand,
            self.ref_name,
            self.ref_len,
            self.ref_start,
            self.ref_end,
            self.matches,
            self.block_len,
            self.quality
        )?;

        // Write CIGAR if present
        if let Some(ref cigar) = self.cigar {
            write!(f, "\tcg:Z:{}", cigar)?;
        }

        // Write other tags
        for (key, val) in &self.tags {
            if key != "cg" {
                write!(f, "\t{}:{}", key, val)?;
            }
        }

        Ok(())
    }
}
