//! Lemma-Scout main entry point
//!
//! Command-line interface for the encyclopedia infobox harvester.

use anyhow::Context;
use clap::Parser;
use lemma_scout::config::{load_config_with_hash, Config, FetchMode};
use lemma_scout::crawler::{crawl, CrawlOutcome};
use lemma_scout::pipeline::harvest_records;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lemma-Scout: an encyclopedia infobox harvester
///
/// Expands a link frontier from seed pages round by round, checkpointing
/// the discovered URL set after every round, and extracts structured
/// entity records from the discovered pages.
#[derive(Parser, Debug)]
#[command(name = "lemma-scout")]
#[command(version)]
#[command(about = "An encyclopedia infobox harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "records")]
    dry_run: bool,

    /// Extract entity records from an existing checkpoint instead of crawling
    #[arg(long, conflicts_with = "dry_run")]
    records: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.records {
        handle_records(&config).await?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lemma_scout=info,warn"),
            1 => EnvFilter::new("lemma_scout=debug,info"),
            2 => EnvFilter::new("lemma_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config) {
    println!("=== Lemma-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Fetch mode: {}",
        match config.crawler.fetch_mode {
            FetchMode::Remote => "remote",
            FetchMode::Local => "local",
        }
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  Max rounds: {}", config.crawler.max_rounds);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );

    println!("\nSite:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  User agent: {}", config.site.user_agent);

    println!("\nFiles:");
    println!("  Seeds: {}", config.io.seed_path);
    println!("  Checkpoint: {}", config.io.checkpoint_path);
    println!("  Records: {}", config.io.records_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let report = crawl(config).await?;

    match report.outcome {
        CrawlOutcome::Converged => {
            tracing::info!(
                "Converged: {} URLs discovered in {} rounds",
                report.discovered,
                report.rounds_completed
            );
        }
        CrawlOutcome::Exhausted => {
            tracing::info!(
                "Round budget exhausted: {} URLs discovered in {} rounds",
                report.discovered,
                report.rounds_completed
            );
        }
    }

    if report.stalled_rounds > 0 {
        tracing::warn!(
            "{} round(s) produced nothing because every fetch failed",
            report.stalled_rounds
        );
    }

    println!(
        "✓ {} URLs discovered; checkpoint at {}",
        report.discovered, config.io.checkpoint_path
    );

    Ok(())
}

/// Handles the --records mode: harvests entity records from the checkpoint
async fn handle_records(config: &Config) -> anyhow::Result<()> {
    let written = harvest_records(config).await?;
    println!(
        "✓ {} records written to {}",
        written, config.io.records_path
    );
    Ok(())
}
