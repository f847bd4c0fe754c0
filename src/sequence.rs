/// Sequence records and FASTA input
///
/// Reference and reads are both loaded as plain `Sequence` records. Content is
/// uppercased on load so that seeding and alignment compare bases case-insensitively.
use anyhow::{bail, Context, Result};
use flate2::read::MultiGzDecoder;
use noodles::bgzf;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A named sequence (reference contig or read)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub title: String,
    pub content: Vec<u8>,
}

impl Sequence {
    pub fn new(title: impl Into<String>, content: impl AsRef<[u8]>) -> Self {
        Sequence {
            title: title.into(),
            content: content.as_ref().to_ascii_uppercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Open a FASTA file, decompressing `.gz` and `.bgz` by extension
pub fn open_fasta_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open FASTA: {}", path.display()))?;

    let extension = path.extension().and_then(|ext| ext.to_str());
    let reader: Box<dyn BufRead> = match extension {
        Some("bgz") => Box::new(BufReader::new(bgzf::io::reader::Reader::new(file))),
        Some("gz") => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        _ => Box::new(BufReader::new(file)),
    };

    Ok(reader)
}

/// Parse FASTA records from any reader
///
/// The title is the first whitespace-delimited token of the header line.
/// Multi-line records are concatenated.
pub fn parse_fasta<R: Read>(reader: R) -> Result<Vec<Sequence>> {
    let reader = BufReader::new(reader);
    let mut records = Vec::new();
    let mut current: Option<Sequence> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            let title = header.split_whitespace().next().unwrap_or("");
            current = Some(Sequence {
                title: title.to_string(),
                content: Vec::new(),
            });
        } else if !trimmed.is_empty() {
            match current.as_mut() {
                Some(record) => record
                    .content
                    .extend(trimmed.bytes().map(|b| b.to_ascii_uppercase())),
                None => bail!(
                    "Sequence data before first FASTA header at line {}",
                    line_no + 1
                ),
            }
        }
    }

    if let Some(record) = current {
        records.push(record);
    }

    Ok(records)
}

/// Read every record from a FASTA file
pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
    let path = path.as_ref();
    let input = open_fasta_input(path)?;
    parse_fasta(input).with_context(|| format!("Failed to parse FASTA: {}", path.display()))
}

/// Read the reference: the first record of the file, which must be non-empty
pub fn read_reference<P: AsRef<Path>>(path: P) -> Result<Sequence> {
    let path = path.as_ref();
    let mut records = read_fasta(path)?;
    if records.is_empty() {
        bail!("No sequences in reference file: {}", path.display());
    }
    if records.len() > 1 {
        log::warn!(
            "Reference file {} has {} records, only the first ({}) is used",
            path.display(),
            records.len(),
            records[0].title
        );
    }
    let reference = records.swap_remove(0);
    if reference.is_empty() {
        bail!("Reference sequence {} is empty", reference.title);
    }
    Ok(reference)
}

/// Read all reads, rejecting empty records
pub fn read_reads<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
    let path = path.as_ref();
    let reads = read_fasta(path)?;
    if let Some(empty) = reads.iter().find(|read| read.is_empty()) {
        bail!(
            "Read {} in {} has no sequence content",
            empty.title,
            path.display()
        );
    }
    Ok(reads)
}
