//! Plain-text readers.

use crate::jobs::inverted_index::Document;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read `path` as lines, trimmed, with blank lines dropped.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    debug!(path = %path.display(), lines = lines.len(), "read input lines");
    Ok(lines)
}

/// Read every file matching `pattern` as a `(path, contents)` document, in
/// sorted path order.
///
/// `pattern` is a glob (`docs/*.txt`, `corpus/**/*.md`) or a plain file path.
/// Directories that match are skipped.
///
/// # Errors
///
/// Returns an error if the pattern is invalid, nothing matches, or a matched
/// file cannot be read.
pub fn read_documents(pattern: &str) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("bad document pattern {pattern}"))?
        .filter_map(|entry| match entry {
            Ok(path) if !path.is_file() => None,
            other => Some(other),
        })
        .collect::<Result<_, _>>()
        .with_context(|| format!("walk document pattern {pattern}"))?;
    if files.is_empty() {
        bail!("no documents match {pattern}");
    }
    files.sort();
    debug!(pattern, documents = files.len(), "matched documents");

    files
        .into_iter()
        .map(|path| {
            let text =
                fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}
