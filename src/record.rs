//! Entity record data model
//!
//! A record is the structured result of extracting one encyclopedia page:
//! the entry title, the infobox attribute pairs, the summary paragraph, and
//! any image references. Records are serialized as JSON Lines by the
//! extraction pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A structured entity extracted from one encyclopedia page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// The entry title (the page's lemma name)
    pub title: String,

    /// Infobox attribute key/value pairs
    ///
    /// A BTreeMap keeps the serialized key order stable across runs.
    pub attributes: BTreeMap<String, String>,

    /// Summary paragraph with citation markers stripped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Image reference URLs found on the page
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<String>,

    /// The URL or file path this record was extracted from
    pub source: String,
}
