//! Crawler module for frontier expansion
//!
//! This module contains the core crawling logic, including:
//! - Page fetching (HTTP or local files)
//! - Infobox link and record extraction
//! - Concurrent batch execution
//! - The round state machine with per-round checkpointing

pub mod extractor;
mod fetcher;
mod frontier;
mod pool;

pub use extractor::{extract_links, extract_record};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use frontier::{CrawlOutcome, CrawlReport, CrawlSession};
pub use pool::run_batch;

use crate::config::Config;
use crate::store;
use crate::{Result, ScoutError};
use std::collections::HashSet;
use std::path::PathBuf;

/// Runs a complete frontier crawl from the configured seed list
///
/// This is the main entry point for link discovery. It will:
/// 1. Read the seed URL list (fatal if unreadable or empty)
/// 2. Seed a crawl session
/// 3. Expand the frontier round by round, checkpointing after each
/// 4. Return the final report
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl reached a terminal state
/// * `Err(ScoutError)` - Seed list or checkpoint I/O failed
pub async fn crawl(config: &Config) -> Result<CrawlReport> {
    let seed_path = PathBuf::from(&config.io.seed_path);
    let seeds: HashSet<String> =
        store::read_url_list(&seed_path).map_err(|source| ScoutError::SeedList {
            path: seed_path.clone(),
            source,
        })?;

    if seeds.is_empty() {
        return Err(ScoutError::EmptySeedList { path: seed_path });
    }

    let mut session = CrawlSession::new(config, seeds)?;
    session.run().await
}
