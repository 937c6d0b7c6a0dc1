//! Linkscout main entry point
//!
//! Command-line interface for the two discovery engines: `crawl` runs the
//! recursive depth-bounded engine from a seed URL, `count` runs the bounded
//! batch fetcher over URLs read from stdin.

use anyhow::Context;
use clap::{Parser, Subcommand};
use linkscout::fetcher::HttpFetcher;
use linkscout::{run_batch, ConfigError, RecursiveCrawler, ResultSink};
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USER_AGENT: &str = concat!("linkscout/", env!("CARGO_PKG_VERSION"));

/// Linkscout: concurrent URL discovery
#[derive(Parser, Debug)]
#[command(name = "linkscout")]
#[command(version)]
#[command(about = "Concurrent URL discovery engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recursively crawl outward from a seed URL up to a depth limit
    Crawl {
        /// Seed URL to start from
        seed: String,

        /// Maximum traversal depth (0 fetches nothing)
        #[arg(short, long, default_value_t = 4)]
        depth: u32,

        /// Per-fetch timeout in seconds
        #[arg(long, value_name = "SECONDS")]
        timeout_secs: Option<u64>,
    },

    /// Fetch URLs read from stdin, one per line, with a fixed task budget
    Count {
        /// Number of concurrent fetch tasks
        #[arg(short = 'k', long = "concurrency", default_value_t = 2)]
        concurrency: usize,

        /// Count occurrences of this pattern in each body
        #[arg(short, long)]
        pattern: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl {
            seed,
            depth,
            timeout_secs,
        } => handle_crawl(&seed, depth, timeout_secs).await,
        Command::Count {
            concurrency,
            pattern,
        } => handle_count(concurrency, pattern.as_deref()).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkscout=info,warn"),
            1 => EnvFilter::new("linkscout=debug,info"),
            2 => EnvFilter::new("linkscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles the `crawl` subcommand
///
/// Individual fetch failures are reported per URL and do not affect the exit
/// status; only startup errors are fatal.
async fn handle_crawl(seed: &str, depth: u32, timeout_secs: Option<u64>) -> anyhow::Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(USER_AGENT).context("failed to build HTTP client")?);
    let sink = Arc::new(ResultSink::new());

    let mut crawler = RecursiveCrawler::new(fetcher, sink.clone());
    if let Some(secs) = timeout_secs {
        crawler = crawler.with_timeout(Duration::from_secs(secs));
    }

    tracing::info!("crawling from {} to depth {}", seed, depth);
    crawler.crawl(seed, depth).await;

    for record in sink.drain() {
        match &record.error {
            None => println!(
                "found: {} ({} bytes, {} links)",
                record.url,
                record.body.as_deref().map_or(0, str::len),
                record.links.len()
            ),
            Some(e) => println!("error: {}", e),
        }
    }
    tracing::info!("visited {} URLs", crawler.visited().len());

    Ok(())
}

/// Handles the `count` subcommand
///
/// Reads one URL per line from stdin and prints one line per processed URL.
/// Exits non-zero only on configuration or input-stream errors.
async fn handle_count(concurrency: usize, pattern: Option<&str>) -> anyhow::Result<()> {
    if concurrency == 0 {
        return Err(ConfigError::InvalidConcurrency.into());
    }

    let pattern = pattern
        .map(|p| {
            Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()?;

    let fetcher = Arc::new(HttpFetcher::new(USER_AGENT).context("failed to build HTTP client")?);
    let sink = ResultSink::new();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_batch(stdin, concurrency, fetcher, pattern, &sink).await?;

    for record in sink.drain() {
        match (&record.error, record.matches) {
            (Some(e), _) => println!("{}\terror: {}", record.url, e),
            (None, Some(count)) => println!("{}\t{}", record.url, count),
            (None, None) => println!(
                "{}\t{} bytes",
                record.url,
                record.body.as_deref().map_or(0, str::len)
            ),
        }
    }

    Ok(())
}
