#![allow(dead_code)]
/// Utility functions for testing
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use readmap::{AlignmentResult, LocalAligner, ScoringParams, SeedIndex, Sequence};

const BASES: [u8; 4] = *b"ACGT";

/// Generate a random DNA sequence of given length
pub fn generate_dna_sequence(length: usize) -> String {
    use rand::thread_rng;
    let mut rng = thread_rng();

    (0..length)
        .map(|_| BASES[rng.gen_range(0..4)] as char)
        .collect()
}

/// Deterministic random DNA
pub fn seeded_dna(rng: &mut StdRng, length: usize) -> Vec<u8> {
    (0..length).map(|_| BASES[rng.gen_range(0..4)]).collect()
}

/// Substitute the base at `pos` with a different one
pub fn mutate(seq: &mut [u8], pos: usize) {
    seq[pos] = match seq[pos] {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        _ => b'G',
    };
}

/// Generate a FASTA file with specified sequences
pub fn create_fasta_file(path: &Path, sequences: &[(&str, &str)]) {
    let mut content = String::new();
    for (name, seq) in sequences {
        content.push_str(&format!(">{name}\n{seq}\n"));
    }
    fs::write(path, content).expect("Failed to write FASTA file");
}

/// A reference with reads sampled from it
pub struct SyntheticData {
    pub reference: Sequence,
    pub reads: Vec<Sequence>,
    /// Origin of each read in the reference, `None` for random reads
    pub origins: Vec<Option<usize>>,
}

/// Sample reads from a random reference: exact copies, copies with one
/// substitution in the middle, and unrelated random reads
pub fn synthetic_data(
    seed: u64,
    reference_len: usize,
    read_count: usize,
    read_len: usize,
) -> SyntheticData {
    let mut rng = StdRng::seed_from_u64(seed);
    let reference = Sequence::new("chr1", seeded_dna(&mut rng, reference_len));

    let mut reads = Vec::with_capacity(read_count);
    let mut origins = Vec::with_capacity(read_count);
    for i in 0..read_count {
        let title = format!("read{i}");
        match i % 3 {
            0 | 1 => {
                let pos = rng.gen_range(0..=reference_len - read_len);
                let mut content = reference.content[pos..pos + read_len].to_vec();
                if i % 3 == 1 {
                    mutate(&mut content, read_len / 2);
                }
                reads.push(Sequence::new(title, content));
                origins.push(Some(pos));
            }
            _ => {
                reads.push(Sequence::new(title, seeded_dna(&mut rng, read_len)));
                origins.push(None);
            }
        }
    }

    SyntheticData {
        reference,
        reads,
        origins,
    }
}

/// Seed index returning fixed offsets per query
#[derive(Default)]
pub struct FixedSeeds {
    seeds: HashMap<Vec<u8>, Vec<usize>>,
}

impl FixedSeeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, offsets: &[usize]) -> Self {
        self.seeds.insert(query.as_bytes().to_vec(), offsets.to_vec());
        self
    }
}

impl SeedIndex for FixedSeeds {
    fn lookup(&self, query: &[u8]) -> Vec<usize> {
        self.seeds.get(query).cloned().unwrap_or_default()
    }
}

/// Aligner returning a scripted result per window content
#[derive(Default)]
pub struct ScriptedAligner {
    results: HashMap<Vec<u8>, AlignmentResult>,
}

impl ScriptedAligner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, window: &[u8], result: AlignmentResult) -> Self {
        self.results.insert(window.to_vec(), result);
        self
    }
}

impl LocalAligner for ScriptedAligner {
    fn align(&self, window: &[u8], _read: &[u8], _scoring: &ScoringParams) -> AlignmentResult {
        self.results.get(window).cloned().unwrap_or_default()
    }
}

/// Alignment result with the given counts spanning `local_min..local_max`
pub fn scripted_result(
    matches: usize,
    mismatches: usize,
    gaps: usize,
    local_min: usize,
    local_max: usize,
) -> AlignmentResult {
    AlignmentResult {
        matches,
        mismatches,
        gaps,
        local_min,
        local_max,
        ..Default::default()
    }
}
