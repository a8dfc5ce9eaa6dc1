//! Comma-separated table input for the natural join.

use crate::jobs::natural_join::Row;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Read a table whose first row is a header, tagging each data row with
/// `table_id`.
///
/// Fields are trimmed; rows may have differing column counts. Rows whose fields
/// are all empty are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a record cannot be parsed.
pub fn read_table(path: impl AsRef<Path>, table_id: u8) -> Result<Vec<(u8, Row)>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(f);

    let mut out = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("parse CSV record #{} of {}", i + 1, path.display()))?;
        if rec.iter().all(str::is_empty) {
            continue;
        }
        out.push((table_id, rec.iter().map(String::from).collect()));
    }
    debug!(path = %path.display(), table_id, rows = out.len(), "read table");
    Ok(out)
}
