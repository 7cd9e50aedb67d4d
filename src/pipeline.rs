//! Record harvesting pipeline
//!
//! Consumes the checkpoint file produced by the frontier crawl: fetches
//! every discovered URL, extracts its entity record, and writes the records
//! as JSON Lines. Pages that are unreachable or carry no infobox are logged
//! and skipped; only URL-list and output I/O failures abort the harvest.

use crate::config::Config;
use crate::crawler::{extract_record, run_batch, FetchError, Fetcher};
use crate::record::EntityRecord;
use crate::{store, Result, ScoutError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Why a single page produced no record
#[derive(Debug, Error)]
enum HarvestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No infobox record in {target}")]
    Malformed { target: String },
}

/// Fetches every URL in the checkpoint and writes their entity records
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(usize)` - Number of records written
/// * `Err(ScoutError)` - Checkpoint unreadable or records file unwritable
pub async fn harvest_records(config: &Config) -> Result<usize> {
    let list_path = PathBuf::from(&config.io.checkpoint_path);
    let targets = store::read_url_list(&list_path).map_err(|source| ScoutError::UrlList {
        path: list_path,
        source,
    })?;

    tracing::info!("Harvesting records from {} pages", targets.len());

    let fetcher = Arc::new(Fetcher::new(config)?);
    let base_url = Url::parse(&config.site.base_url)?;
    let width = config.crawler.max_concurrent_fetches as usize;

    let records: Vec<EntityRecord> = run_batch(targets, width, move |target| {
        let fetcher = Arc::clone(&fetcher);
        let base_url = base_url.clone();
        async move {
            let body = fetcher.fetch(&target).await?;
            extract_record(&body, &base_url, &target)
                .ok_or(HarvestError::Malformed { target })
        }
    })
    .await;

    let mut lines = Vec::with_capacity(records.len());
    for record in &records {
        lines.push(serde_json::to_string(record)?);
    }

    let records_path = PathBuf::from(&config.io.records_path);
    store::write_lines(&records_path, &lines).map_err(|source| ScoutError::Records {
        path: records_path,
        source,
    })?;

    tracing::info!("Wrote {} records", records.len());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, FetchMode, IoConfig, SiteConfig};
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    fn local_config(dir: &Path) -> Config {
        Config {
            crawler: CrawlerConfig {
                fetch_mode: FetchMode::Local,
                request_timeout_secs: 5,
                max_rounds: 1,
                max_concurrent_fetches: 4,
            },
            site: SiteConfig {
                base_url: "https://baike.example.com".to_string(),
                user_agent: "TestAgent/1.0".to_string(),
            },
            io: IoConfig {
                seed_path: dir.join("seeds.txt").to_string_lossy().into_owned(),
                checkpoint_path: dir.join("links.txt").to_string_lossy().into_owned(),
                records_path: dir.join("records.jsonl").to_string_lossy().into_owned(),
            },
        }
    }

    fn entity_page(title: &str) -> String {
        format!(
            r#"<html><body>
            <dd class="lemmaWgt-lemmaTitle-title"><h1>{}</h1></dd>
            <div class="lemma-summary">About {}.[1]</div>
            <dl class="basicInfo-block basicInfo-left">
                <dt>Kind</dt><dd>City</dd>
            </dl>
            </body></html>"#,
            title, title
        )
    }

    #[tokio::test]
    async fn test_harvest_writes_one_record_per_entity_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_config(dir.path());

        let page_a = dir.path().join("a.html");
        let page_b = dir.path().join("b.html");
        let page_c = dir.path().join("c.html");
        fs::write(&page_a, entity_page("Alpha")).unwrap();
        fs::write(&page_b, entity_page("Beta")).unwrap();
        // C has no infobox and yields no record
        fs::write(&page_c, "<html><body>stub</body></html>").unwrap();

        let urls: HashSet<String> = [&page_a, &page_b, &page_c]
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        store::write_url_list(Path::new(&config.io.checkpoint_path), &urls).unwrap();

        let written = harvest_records(&config).await.unwrap();
        assert_eq!(written, 2);

        let content = fs::read_to_string(&config.io.records_path).unwrap();
        let mut titles: Vec<String> = content
            .lines()
            .map(|line| {
                let record: EntityRecord = serde_json::from_str(line).unwrap();
                record.title
            })
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["Alpha".to_string(), "Beta".to_string()]);
    }

    #[tokio::test]
    async fn test_harvest_without_checkpoint_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_config(dir.path());

        let result = harvest_records(&config).await;
        assert!(matches!(result, Err(ScoutError::UrlList { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_pages_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_config(dir.path());

        let page_a = dir.path().join("a.html");
        fs::write(&page_a, entity_page("Alpha")).unwrap();

        let urls: HashSet<String> = [
            page_a.to_string_lossy().into_owned(),
            dir.path().join("gone.html").to_string_lossy().into_owned(),
        ]
        .into_iter()
        .collect();
        store::write_url_list(Path::new(&config.io.checkpoint_path), &urls).unwrap();

        let written = harvest_records(&config).await.unwrap();
        assert_eq!(written, 1);
    }
}
