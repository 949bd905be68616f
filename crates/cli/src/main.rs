//! tagwindow — rolling average degree of a hashtag co-occurrence graph.
//!
//! Reads line-delimited JSON tweet records from an input file and writes
//! one line per accepted event to the output file: the average vertex
//! degree of the graph of hashtags seen in the trailing window, truncated
//! to two decimals. Skipped records (malformed, rate-limit markers,
//! events older than the window) produce no output line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tagwindow_core::TagWindowError;
use tagwindow_graph::{pipeline::truncate2, Pipeline};
use tagwindow_ingest::{parse_line, JsonlSource};

// ── CLI ─────────────────────────────────────────────────────────────

/// Rolling average degree of the hashtag co-occurrence graph.
#[derive(Parser, Debug)]
#[command(name = "tagwindow", version, about)]
struct Cli {
    /// Input file of line-delimited JSON tweet records.
    input: PathBuf,

    /// Output file, one average-degree line per accepted event.
    output: PathBuf,

    /// Trailing window length in milliseconds (defaults to TAGWINDOW_WINDOW_MS, then 60000).
    #[arg(long)]
    window_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tagwindow_core::config::load_dotenv();
    let config = tagwindow_core::Config::from_env();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let source = JsonlSource::open(&cli.input)
        .with_context(|| format!("cannot open input file {}", cli.input.display()))?;
    let out = File::create(&cli.output)
        .with_context(|| format!("cannot create output file {}", cli.output.display()))?;
    let mut out = BufWriter::new(out);

    let window_ms = cli.window_ms.unwrap_or(config.window.window_ms);
    let stats = run(source, &mut out, window_ms)?;
    out.flush()?;

    info!(
        accepted = stats.accepted,
        skipped = stats.skipped,
        rejected = stats.rejected,
        "done"
    );
    Ok(())
}

#[derive(Debug, Default)]
struct RunStats {
    accepted: u64,
    skipped: u64,
    rejected: u64,
}

/// The forward pass: one record in, at most one statistic out.
fn run(
    source: impl IntoIterator<Item = Result<String, TagWindowError>>,
    out: &mut impl Write,
    window_ms: u64,
) -> anyhow::Result<RunStats> {
    let mut pipeline = Pipeline::new(window_ms);
    let mut stats = RunStats::default();

    for line in source {
        let line = line?;
        let event = match parse_line(&line) {
            Ok(event) => event,
            Err(TagWindowError::RateLimit) => {
                debug!("rate limit marker skipped");
                stats.skipped += 1;
                continue;
            }
            Err(e) => {
                debug!(error = %e, "record skipped");
                stats.skipped += 1;
                continue;
            }
        };

        match pipeline.process(event) {
            Some(avg) => {
                writeln!(out, "{:.2}", truncate2(avg))?;
                stats.accepted += 1;
            }
            None => stats.rejected += 1,
        }
    }

    Ok(stats)
}
