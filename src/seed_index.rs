//! Seed lookup over the reference
//!
//! A seed index proposes reference offsets where a read plausibly maps. The
//! mapper treats it as a collaborator; `SuffixArrayIndex` is the bundled
//! implementation.

use bio::data_structures::suffix_array::{suffix_array, RawSuffixArray};

/// Default minimum length of an exact match used as a seed
pub const DEFAULT_MIN_SEED_LENGTH: usize = 25;

const SENTINEL: u8 = b'$';

/// Seed lookup collaborator
///
/// Offsets are in reference coordinates. The order of the returned offsets is
/// the order in which candidates get evaluated, so implementations should
/// return them in a stable order.
pub trait SeedIndex: Sync {
    fn lookup(&self, query: &[u8]) -> Vec<usize>;
}

/// Suffix array over the reference
///
/// `lookup` finds the longest substring of the query that occurs exactly in
/// the reference and returns every reference offset of that substring in
/// ascending order. Matches shorter than `min_seed_length` yield no seeds.
pub struct SuffixArrayIndex {
    text: Vec<u8>,
    sa: RawSuffixArray,
    min_seed_length: usize,
}

/// Longest exact match of a query against the reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMatch {
    /// Start of the matched substring in the query
    pub query_offset: usize,
    pub length: usize,
    /// Reference offsets of the substring, ascending
    pub reference_offsets: Vec<usize>,
}

impl SuffixArrayIndex {
    pub fn build(reference: &[u8], min_seed_length: usize) -> Self {
        let mut text = Vec::with_capacity(reference.len() + 1);
        text.extend_from_slice(reference);
        text.push(SENTINEL);
        let sa = suffix_array(&text);

        SuffixArrayIndex {
            text,
            sa,
            min_seed_length: min_seed_length.max(1),
        }
    }

    pub fn reference_len(&self) -> usize {
        self.text.len() - 1
    }

    /// Suffix-array interval of suffixes starting with `pattern[..depth]`,
    /// extended one symbol at a time for as long as the pattern keeps matching.
    /// Returns the interval and the matched depth.
    fn extend_match(&self, pattern: &[u8]) -> (usize, usize, usize) {
        let (mut lo, mut hi) = (0, self.sa.len());
        let mut depth = 0;

        for &symbol in pattern {
            if symbol == SENTINEL {
                break;
            }
            let interval = &self.sa[lo..hi];
            let below = interval.partition_point(|&pos| self.text[pos + depth] < symbol);
            let upto = interval.partition_point(|&pos| self.text[pos + depth] <= symbol);
            if below == upto {
                break;
            }
            hi = lo + upto;
            lo += below;
            depth += 1;
        }

        (lo, hi, depth)
    }

    /// Longest exact match of any substring of `query`; ties keep the
    /// leftmost query position.
    pub fn longest_match(&self, query: &[u8]) -> Option<SeedMatch> {
        let mut best: Option<(usize, usize, usize, usize)> = None;

        for start in 0..query.len() {
            let best_len = best.map_or(0, |(_, _, _, len)| len);
            if query.len() - start <= best_len {
                break;
            }
            let (lo, hi, depth) = self.extend_match(&query[start..]);
            if depth > best_len {
                best = Some((start, lo, hi, depth));
            }
        }

        let (query_offset, lo, hi, length) = best?;
        if length < self.min_seed_length {
            return None;
        }

        let mut reference_offsets = self.sa[lo..hi].to_vec();
        reference_offsets.sort_unstable();

        Some(SeedMatch {
            query_offset,
            length,
            reference_offsets,
        })
    }
}

impl SeedIndex for SuffixArrayIndex {
    fn lookup(&self, query: &[u8]) -> Vec<usize> {
        self.longest_match(query)
            .map(|seed| seed.reference_offsets)
            .unwrap_or_default()
    }
}
