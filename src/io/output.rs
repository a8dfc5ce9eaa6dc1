//! Result rendering: console text and JSON.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;

/// `word: count` lines, most frequent first, ties broken by word.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_word_counts<W: Write>(w: &mut W, counts: &[(String, u64)]) -> Result<()> {
    let mut sorted: Vec<&(String, u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (word, count) in sorted {
        writeln!(w, "{word}: {count}")?;
    }
    Ok(())
}

/// `word: [doc, ...]` lines sorted by word.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_index<W: Write>(w: &mut W, index: &[(String, Vec<String>)]) -> Result<()> {
    let mut sorted: Vec<&(String, Vec<String>)> = index.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    for (word, docs) in sorted {
        writeln!(w, "{word}: [{}]", docs.join(", "))?;
    }
    Ok(())
}

/// One `(a, b, c)` line per row, in the given order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_rows<W: Write>(w: &mut W, rows: &[Vec<String>]) -> Result<()> {
    for row in rows {
        writeln!(w, "({})", row.join(", "))?;
    }
    Ok(())
}

/// One `(key, value)` line per pair, in the given order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_pairs<W: Write, K: Display, V: Display>(w: &mut W, pairs: &[(K, V)]) -> Result<()> {
    for (k, v) in pairs {
        writeln!(w, "({k}, {v})")?;
    }
    Ok(())
}

/// Pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}
