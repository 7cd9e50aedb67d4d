//! Lemma-Scout: an encyclopedia infobox harvester
//!
//! This crate discovers related entity pages by iteratively expanding a link
//! frontier from a set of seed pages, checkpointing the discovered URL set
//! after every round, and then extracts structured entity records (infobox
//! attributes, summary text, image references) from the discovered pages.

pub mod config;
pub mod crawler;
pub mod pipeline;
pub mod record;
pub mod store;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Lemma-Scout operations
///
/// Only the failures represented here abort a run. Per-page fetch failures
/// are represented by [`crawler::FetchError`] and are swallowed at the
/// worker-pool level.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read seed list {path}: {source}")]
    SeedList {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read URL list {path}: {source}")]
    UrlList {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write checkpoint {path}: {source}")]
    Checkpoint {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write records {path}: {source}")]
    Records {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Seed list {path} contains no URLs")]
    EmptySeedList { path: PathBuf },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Lemma-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, CrawlReport, CrawlSession, FetchError, Fetcher};
pub use record::EntityRecord;
