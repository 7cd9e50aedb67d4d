use serde::Deserialize;

/// Main configuration structure for Lemma-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub site: SiteConfig,
    pub io: IoConfig,
}

/// Where page content comes from
///
/// The mode is fixed for the lifetime of a crawl: a session either fetches
/// every target over HTTP or reads every target as a local file path, never
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    Remote,
    Local,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Whether targets are remote URLs or local file paths
    #[serde(rename = "fetch-mode", default = "default_fetch_mode")]
    pub fetch_mode: FetchMode,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of frontier expansion rounds
    #[serde(rename = "max-rounds")]
    pub max_rounds: u32,

    /// Maximum number of concurrent page fetches within a round
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL the infobox hyperlinks are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Identifying User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Input and output file paths
#[derive(Debug, Clone, Deserialize)]
pub struct IoConfig {
    /// Newline-delimited seed URL list, read once at startup
    #[serde(rename = "seed-path")]
    pub seed_path: String,

    /// Newline-delimited discovered URL list, rewritten after every round
    #[serde(rename = "checkpoint-path")]
    pub checkpoint_path: String,

    /// JSON Lines entity record output
    #[serde(rename = "records-path")]
    pub records_path: String,
}

fn default_fetch_mode() -> FetchMode {
    FetchMode::Remote
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_concurrency() -> u32 {
    16
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:88.0) Gecko/20100101 Firefox/88.0".to_string()
}
