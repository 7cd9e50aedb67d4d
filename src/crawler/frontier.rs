//! Frontier crawler - the round state machine
//!
//! This module drives the iterative link-frontier expansion:
//! - seed the visited set and frontier from the seed URL list
//! - each round, fetch every frontier member concurrently and extract the
//!   infobox links from each page
//! - deduplicate the round's links against everything seen so far; the
//!   remainder becomes the next frontier
//! - rewrite the checkpoint with the full visited set after every round
//!
//! The crawl converges when a round discovers nothing new, or is cut off
//! when the round budget is spent. Either way the checkpoint on disk holds
//! the complete visited set at the last completed round.

use crate::config::Config;
use crate::crawler::extractor::extract_links;
use crate::crawler::pool::run_batch;
use crate::crawler::{FetchError, Fetcher};
use crate::{store, Result, ScoutError};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Terminal state of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// A round discovered zero new links; the reachable closure is complete
    Converged,

    /// The round budget was spent with links still waiting in the frontier
    Exhausted,
}

/// Summary of a finished crawl
#[derive(Debug)]
pub struct CrawlReport {
    pub outcome: CrawlOutcome,

    /// Rounds fully completed (including their checkpoint writes)
    pub rounds_completed: u32,

    /// Total URLs in the final visited set
    pub discovered: usize,

    /// Rounds in which every fetch failed
    ///
    /// Such a round is indistinguishable from a legitimately link-free one
    /// and still counts toward convergence; this counter exists so a run
    /// that converged purely through failures is visible in the summary.
    pub stalled_rounds: u32,
}

/// Per-round accounting
struct RoundStats {
    /// Frontier size at the start of the round
    attempted: usize,

    /// Pages fetched and extracted successfully
    succeeded: usize,

    /// Distinct links extracted across all pages this round
    extracted: usize,

    /// Links remaining after deduplication against the visited set
    fresh: usize,
}

/// One crawl run's state, owned by the coordinating flow
///
/// Worker tasks only fetch and extract; every merge into the visited set
/// and every checkpoint write happens here, between rounds, so the set
/// needs no locking.
pub struct CrawlSession {
    fetcher: Arc<Fetcher>,
    base_url: Url,
    concurrency: usize,
    max_rounds: u32,
    checkpoint_path: PathBuf,
    visited: HashSet<String>,
    frontier: HashSet<String>,
    rounds_completed: u32,
    stalled_rounds: u32,
}

impl CrawlSession {
    /// Creates a seeded session
    ///
    /// The visited set and the first frontier both start as the seed set;
    /// duplicates in the seed list have already collapsed in the set.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seeds` - Seed URLs (or file paths in local mode)
    pub fn new(config: &Config, seeds: HashSet<String>) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(config)?);
        let base_url = Url::parse(&config.site.base_url)?;

        Ok(Self {
            fetcher,
            base_url,
            concurrency: config.crawler.max_concurrent_fetches as usize,
            max_rounds: config.crawler.max_rounds,
            checkpoint_path: PathBuf::from(&config.io.checkpoint_path),
            visited: seeds.clone(),
            frontier: seeds,
            rounds_completed: 0,
            stalled_rounds: 0,
        })
    }

    /// Runs rounds until convergence or round-budget exhaustion
    ///
    /// Rounds are strictly sequential: a round's worker pool fully drains
    /// and its checkpoint write completes before the next round starts.
    /// The only errors that propagate out of here are checkpoint write
    /// failures; per-URL fetch failures are dropped inside the pool.
    pub async fn run(&mut self) -> Result<CrawlReport> {
        tracing::info!(
            "Starting crawl: {} seed URLs, budget {} rounds",
            self.frontier.len(),
            self.max_rounds
        );

        let outcome = loop {
            let stats = self.expand_round().await?;

            tracing::info!(
                "Round {}: {}/{} pages fetched, {} links extracted, {} new",
                self.rounds_completed,
                stats.succeeded,
                stats.attempted,
                stats.extracted,
                stats.fresh
            );

            if stats.fresh == 0 {
                break CrawlOutcome::Converged;
            }
            if self.rounds_completed >= self.max_rounds {
                break CrawlOutcome::Exhausted;
            }
        };

        match outcome {
            CrawlOutcome::Converged => {
                tracing::info!("Crawl converged after {} rounds", self.rounds_completed)
            }
            CrawlOutcome::Exhausted => tracing::info!(
                "Round budget spent with {} links still in frontier",
                self.frontier.len()
            ),
        }

        Ok(CrawlReport {
            outcome,
            rounds_completed: self.rounds_completed,
            discovered: self.visited.len(),
            stalled_rounds: self.stalled_rounds,
        })
    }

    /// Runs one expansion round
    ///
    /// Fetch+extract tasks for the whole frontier run concurrently; results
    /// merge by set union, so their completion order does not matter. The
    /// new-link delta is computed against the visited set as it stood
    /// before this round, which also deduplicates links discovered by two
    /// pages within the same round.
    async fn expand_round(&mut self) -> Result<RoundStats> {
        let round = self.rounds_completed + 1;
        let attempted = self.frontier.len();
        tracing::debug!("Round {}: fetching {} pages", round, attempted);

        let targets: Vec<String> = self.frontier.iter().cloned().collect();
        let fetcher = Arc::clone(&self.fetcher);
        let base_url = self.base_url.clone();

        let page_links: Vec<HashSet<String>> =
            run_batch(targets, self.concurrency, move |target| {
                let fetcher = Arc::clone(&fetcher);
                let base_url = base_url.clone();
                async move {
                    let body = fetcher.fetch(&target).await?;
                    Ok::<_, FetchError>(extract_links(&body, &base_url))
                }
            })
            .await;

        let succeeded = page_links.len();
        let mut round_links: HashSet<String> = HashSet::new();
        for links in page_links {
            round_links.extend(links);
        }
        let extracted = round_links.len();

        let fresh_links: HashSet<String> =
            round_links.difference(&self.visited).cloned().collect();
        let fresh = fresh_links.len();

        self.visited.extend(fresh_links.iter().cloned());
        self.write_checkpoint()?;
        self.rounds_completed += 1;

        if attempted > 0 && succeeded == 0 {
            self.stalled_rounds += 1;
            tracing::warn!(
                "Round {} stalled: every fetch failed, no links discovered",
                round
            );
        }

        self.frontier = fresh_links;

        Ok(RoundStats {
            attempted,
            succeeded,
            extracted,
            fresh,
        })
    }

    /// Rewrites the checkpoint with the complete visited set
    ///
    /// A checkpoint failure is fatal to the crawl.
    fn write_checkpoint(&self) -> Result<()> {
        store::write_url_list(&self.checkpoint_path, &self.visited).map_err(|source| {
            ScoutError::Checkpoint {
                path: self.checkpoint_path.clone(),
                source,
            }
        })
    }

    /// The set of all URLs ever added to a frontier
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// URLs waiting for the next round
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }
}
