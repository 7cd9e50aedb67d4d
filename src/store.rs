//! Flat-file storage for URL lists and records
//!
//! The crawl's durable artifacts are plain newline-delimited UTF-8 files:
//! the seed list read once at startup and the checkpoint rewritten after
//! every round. Checkpoint writes go through a temp file and a rename so a
//! reader never observes a partially-written list.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Reads a newline-delimited URL list
///
/// Blank lines and surrounding whitespace are ignored. Duplicates collapse
/// into the returned set.
pub fn read_url_list(path: &Path) -> io::Result<HashSet<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Rewrites a URL list in full, one URL per line, order unspecified
///
/// The new content lands in a sibling temp file first and replaces the
/// target with a rename, so the previous checkpoint stays intact until the
/// new one is complete.
pub fn write_url_list(path: &Path, urls: &HashSet<String>) -> io::Result<()> {
    let mut content = String::new();
    for url in urls {
        content.push_str(url);
        content.push('\n');
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)
}

/// Rewrites a line-oriented output file in full
pub fn write_lines<I, S>(path: &Path, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)
}
