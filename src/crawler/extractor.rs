//! Infobox extraction
//!
//! Encyclopedia pages carry their structured attributes in two definition
//! list blocks (a left and a right column), each a sequence of `dt` keys
//! paired with `dd` values. This module extracts two things from that
//! structure:
//! - the outbound entity links referenced by attribute values, which feed
//!   the frontier crawl
//! - the full entity record (title, attributes, summary, images), which
//!   feeds the harvest pipeline
//!
//! Both functions are pure: they see only page content already fetched and
//! perform no I/O. A page without infobox blocks is not an error; it simply
//! yields no links and no record.

use crate::record::EntityRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use url::Url;

const INFOBOX_BLOCKS: [&str; 2] = [
    "dl.basicInfo-block.basicInfo-left",
    "dl.basicInfo-block.basicInfo-right",
];

/// Extracts the set of entity links referenced by a page's infobox
///
/// For every `dd` value cell in either infobox block, the first `a[href]`
/// descendant (if any) is resolved against `base_url` and percent-decoded.
/// Rows without a hyperlink contribute nothing.
///
/// The result is a set: deduplicated within the page and independent of
/// document order, so the same content always yields the same links.
///
/// # Arguments
///
/// * `html` - The page content
/// * `base_url` - The site base URL relative hrefs are resolved against
///
/// # Returns
///
/// The set of absolute, percent-decoded entity links; empty if the page has
/// no infobox.
pub fn extract_links(html: &str, base_url: &Url) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    let value_selector = match Selector::parse("dd") {
        Ok(s) => s,
        Err(_) => return links,
    };
    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return links,
    };

    for block in infobox_blocks(&document) {
        for value_cell in block.select(&value_selector) {
            let anchor = match value_cell.select(&anchor_selector).next() {
                Some(a) => a,
                None => continue,
            };
            if let Some(href) = anchor.value().attr("href") {
                if let Some(resolved) = resolve_entity_link(href, base_url) {
                    links.insert(resolved);
                }
            }
        }
    }

    links
}

/// Extracts the full entity record from a page
///
/// Returns `None` when the page has no title heading or no infobox
/// attributes; such pages (error pages, bare stubs) carry no entity.
pub fn extract_record(html: &str, base_url: &Url, source: &str) -> Option<EntityRecord> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;

    let attributes = extract_attributes(&document);
    if attributes.is_empty() {
        return None;
    }

    let summary = extract_summary(&document);
    let images = extract_image_links(&document, base_url);

    Some(EntityRecord {
        title,
        attributes,
        summary,
        images,
        source: source.to_string(),
    })
}

/// Extracts the entry title from the lemma heading
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("dd.lemmaWgt-lemmaTitle-title h1").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the infobox attribute pairs
///
/// Within each block the `dt` keys are zipped with the `dd` values in
/// document order, mirroring the key/value row structure.
fn extract_attributes(document: &Html) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();

    let key_selector = match Selector::parse("dt") {
        Ok(s) => s,
        Err(_) => return attributes,
    };
    let value_selector = match Selector::parse("dd") {
        Ok(s) => s,
        Err(_) => return attributes,
    };

    for block in infobox_blocks(document) {
        let keys = block.select(&key_selector);
        let values = block.select(&value_selector);
        for (key, value) in keys.zip(values) {
            let key_text = collapse_text(&key);
            let value_text = collapse_text(&value);
            if !key_text.is_empty() {
                attributes.insert(key_text, value_text);
            }
        }
    }

    attributes
}

/// Extracts the summary paragraph, stripping citation markers like `[3]`
fn extract_summary(document: &Html) -> Option<String> {
    let selector = Selector::parse("div.lemma-summary").ok()?;
    let element = document.select(&selector).next()?;

    let raw: String = element.text().collect::<String>().replace('\n', "");
    let citation = Regex::new(r"\[\d*\]").ok()?;
    let cleaned = citation.replace_all(&raw, "").trim().to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Extracts image reference links from the page's picture blocks
fn extract_image_links(document: &Html, base_url: &Url) -> Vec<String> {
    let selector = match Selector::parse("div.lemma-picture a.image-link[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_entity_link(href, base_url))
        .collect()
}

/// Returns the infobox definition-list blocks present in the document
fn infobox_blocks<'a>(document: &'a Html) -> Vec<ElementRef<'a>> {
    let mut blocks = Vec::new();
    for css in INFOBOX_BLOCKS {
        if let Ok(selector) = Selector::parse(css) {
            blocks.extend(document.select(&selector));
        }
    }
    blocks
}

/// Resolves an infobox href against the site base URL and percent-decodes it
///
/// Entity links are stored in decoded form; the HTTP client re-encodes them
/// on fetch.
fn resolve_entity_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    let absolute = absolute.as_str();

    match urlencoding::decode(absolute) {
        Ok(Cow::Borrowed(_)) => Some(absolute.to_string()),
        Ok(Cow::Owned(decoded)) => Some(decoded),
        Err(_) => Some(absolute.to_string()),
    }
}

/// Collects an element's text content into a single trimmed string
fn collapse_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
