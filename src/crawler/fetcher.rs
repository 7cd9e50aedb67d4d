//! Page fetcher implementation
//!
//! This module obtains raw page content for the crawler, either over HTTP
//! or from local files, depending on the configured fetch mode:
//! - Remote mode issues a single GET with the configured identifying
//!   User-Agent and a bounded request timeout
//! - Local mode reads the target as a UTF-8 file
//!
//! There is no retry logic at this layer; retry policy (if any) belongs to
//! the caller.

use crate::config::{Config, FetchMode};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A per-target fetch failure
///
/// All variants mean the same thing to the crawl: the target is unreachable
/// and contributes nothing to the round. They are kept distinct so the log
/// line names the actual cause.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Unreadable local page {path}: {source}")]
    Read { path: String, source: std::io::Error },
}

/// Fetches page content from remote URLs or local files
///
/// The mode is chosen once at construction and never mixed within a single
/// fetch call.
pub enum Fetcher {
    Remote { client: Client },
    Local,
}

impl Fetcher {
    /// Creates a fetcher for the configured mode
    ///
    /// In remote mode this builds the shared HTTP client with the site's
    /// User-Agent header and request timeout.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Ready to fetch
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        match config.crawler.fetch_mode {
            FetchMode::Remote => {
                let client = build_http_client(
                    &config.site.user_agent,
                    Duration::from_secs(config.crawler.request_timeout_secs),
                )?;
                Ok(Fetcher::Remote { client })
            }
            FetchMode::Local => Ok(Fetcher::Local),
        }
    }

    /// Fetches one page and returns its content
    ///
    /// * Remote mode: a single GET; any non-success status or network error
    ///   is a [`FetchError`]
    /// * Local mode: reads `target` as a UTF-8 file path
    pub async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        match self {
            Fetcher::Remote { client } => fetch_remote(client, target).await,
            Fetcher::Local => fetch_local(target).await,
        }
    }
}

/// Builds an HTTP client with the identifying User-Agent and timeout
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

async fn fetch_remote(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|e| {
        FetchError::Network {
            url: url.to_string(),
            source: e,
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        source: e,
    })
}

async fn fetch_local(path: &str) -> Result<String, FetchError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FetchError::Read {
            path: path.to_string(),
            source: e,
        })
}
