use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::time::Instant;

use readmap::coordinator::{MappingCoordinator, PartitionPolicy};
use readmap::format_io::{open_output, write_results, OutputFormat};
use readmap::seed_index::{SuffixArrayIndex, DEFAULT_MIN_SEED_LENGTH};
use readmap::sequence::{read_reads, read_reference};
use readmap::{MappingConfig, ScoringParams, SmithWaterman, Thresholds};

/// Parse a worker count, rejecting 0
fn parse_thread_count(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|e| format!("Invalid thread count: {e}"))?;
    if n == 0 {
        return Err("Thread count must be at least 1".to_string());
    }
    Ok(n)
}

/// Parse a gap score, rejecting positive values
fn parse_gap_score(s: &str) -> Result<i32, String> {
    let score: i32 = s.parse().map_err(|e| format!("Invalid score: {e}"))?;
    if score > 0 {
        return Err(format!("Gap score {score} must not be positive"));
    }
    Ok(score)
}

/// Parse a fraction in [0, 1]
fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("Invalid number: {e}"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("Value {value} must be between 0 and 1"));
    }
    Ok(value)
}

/// readmap - map reads to a reference by exact-match seeding and local alignment
///
/// Reports the best-supported reference interval of every read, or "No hit found".
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Reference FASTA (first record is used)
    #[clap(value_name = "REFERENCE")]
    reference: String,

    /// Reads FASTA
    #[clap(value_name = "READS")]
    reads: String,

    /// Output file (stdout if not specified)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Output format
    #[clap(short = 'f', long = "format", value_enum, default_value = "text")]
    format: OutputFormat,

    /// Number of mapping workers (and read partitions)
    #[clap(short = 't', long = "threads", default_value = "2", value_parser = parse_thread_count)]
    threads: usize,

    /// Minimum exact-match length for a seed
    #[clap(short = 'k', long = "min-seed-length", default_value_t = DEFAULT_MIN_SEED_LENGTH)]
    min_seed_length: usize,

    /// Score for identical bases
    #[clap(long = "match", default_value = "1", allow_hyphen_values = true)]
    match_score: i32,

    /// Score for substitutions
    #[clap(long = "mismatch", default_value = "-2", allow_hyphen_values = true)]
    mismatch: i32,

    /// Gap-open score
    #[clap(
        long = "gap-open",
        default_value = "-5",
        allow_hyphen_values = true,
        value_parser = parse_gap_score
    )]
    gap_open: i32,

    /// Gap-extend score
    #[clap(
        long = "gap-extend",
        default_value = "-1",
        allow_hyphen_values = true,
        value_parser = parse_gap_score
    )]
    gap_extend: i32,

    /// Identity a candidate must exceed to be accepted
    #[clap(long = "min-identity", default_value = "0.90", value_parser = parse_fraction)]
    min_identity: f64,

    /// Coverage a candidate must exceed to be accepted
    #[clap(long = "min-coverage", default_value = "0.80", value_parser = parse_fraction)]
    min_coverage: f64,

    /// Extend the last partition to the end of the reads instead of leaving
    /// reads that do not divide evenly across workers unmapped
    #[clap(long = "cover-remainder")]
    cover_remainder: bool,

    /// Quiet mode (no progress or summary output)
    #[clap(long = "quiet")]
    quiet: bool,
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let config = MappingConfig {
        scoring: ScoringParams {
            match_score: args.match_score,
            mismatch: args.mismatch,
            gap_open: args.gap_open,
            gap_extend: args.gap_extend,
        },
        thresholds: Thresholds {
            min_identity: args.min_identity,
            min_coverage: args.min_coverage,
        },
        threads: args.threads,
        partition: if args.cover_remainder {
            PartitionPolicy::ExtendLast
        } else {
            PartitionPolicy::DropRemainder
        },
    };

    let reference = read_reference(&args.reference)?;
    log::info!(
        "Read reference {}, length = {}",
        reference.title,
        reference.len()
    );

    let reads = read_reads(&args.reads)?;
    log::info!("Read {} sequences", reads.len());

    let started = Instant::now();
    let index = SuffixArrayIndex::build(&reference.content, args.min_seed_length);
    log::debug!(
        "Built suffix array index over {} bases in {:.3}s",
        index.reference_len(),
        started.elapsed().as_secs_f64()
    );

    let aligner = SmithWaterman;
    let coordinator = MappingCoordinator::new(&reference, &index, &aligner, &config);
    let run = coordinator.map_reads(&reads)?;
    log::info!(
        "Mapped {} of {} reads",
        run.summary.mapped,
        run.summary.read_count
    );

    let mut out = open_output(args.output.as_deref())?;
    write_results(&mut out, args.format, &reference, &reads, &run.results)
        .context("Failed to write mapping results")?;

    if !args.quiet {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle, "{}", run.summary)?;
    }

    Ok(())
}
