use crate::config::types::{Config, CrawlerConfig, IoConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_io_config(&config.io)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_rounds < 1 {
        return Err(ConfigError::Validation(format!(
            "max_rounds must be >= 1, got {}",
            config.max_rounds
        )));
    }

    // Single-digit seconds keeps one slow host from stalling a whole round
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 9 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 9, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates input/output paths
fn validate_io_config(config: &IoConfig) -> Result<(), ConfigError> {
    if config.seed_path.is_empty() {
        return Err(ConfigError::Validation(
            "seed_path cannot be empty".to_string(),
        ));
    }

    if config.checkpoint_path.is_empty() {
        return Err(ConfigError::Validation(
            "checkpoint_path cannot be empty".to_string(),
        ));
    }

    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "records_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::FetchMode;

    fn valid_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                fetch_mode: FetchMode::Remote,
                request_timeout_secs: 5,
                max_rounds: 3,
                max_concurrent_fetches: 16,
            },
            site: SiteConfig {
                base_url: "https://baike.example.com".to_string(),
                user_agent: "TestAgent/1.0".to_string(),
            },
            io: IoConfig {
                seed_path: "./seeds.txt".to_string(),
                checkpoint_path: "./links.txt".to_string(),
                records_path: "./records.jsonl".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let mut config = valid_config();
        config.crawler.max_rounds = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_timeout_out_of_range_rejected() {
        let mut config = valid_config();
        config.crawler.request_timeout_secs = 30;
        assert!(validate(&config).is_err());

        config.crawler.request_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_concurrency_out_of_range_rejected() {
        let mut config = valid_config();
        config.crawler.max_concurrent_fetches = 0;
        assert!(validate(&config).is_err());

        config.crawler.max_concurrent_fetches = 500;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = valid_config();
        config.site.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut config = valid_config();
        config.io.checkpoint_path = String::new();
        assert!(validate(&config).is_err());
    }
}
