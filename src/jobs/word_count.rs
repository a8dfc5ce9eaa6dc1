//! Word count: how many times each token appears across all lines.

use crate::MapReduce;
use crate::error::MapReduceResult;
use crate::jobs::tokenize;

/// Emit `(token, 1)` for every token in `line`.
#[must_use]
pub fn map(line: &str) -> Vec<(String, u64)> {
    tokenize(line).map(|token| (token, 1)).collect()
}

/// Sum the counts emitted for `word`.
#[must_use]
pub fn reduce(word: &str, counts: Vec<u64>) -> (String, u64) {
    (word.to_string(), counts.into_iter().sum())
}

/// Count every token in `lines`.
///
/// # Errors
///
/// Returns a [`MapReduceError`](crate::MapReduceError) if a worker fails.
pub fn run(driver: &MapReduce, lines: &[String]) -> MapReduceResult<Vec<(String, u64)>> {
    driver.map_reduce(
        lines,
        |line: &String| map(line),
        |word: &String, counts| reduce(word, counts),
    )
}

/// Only the map side: every `(token, 1)` pair in input order per partition.
///
/// # Errors
///
/// Returns a [`MapReduceError`](crate::MapReduceError) if a worker fails.
pub fn run_map_only(driver: &MapReduce, lines: &[String]) -> MapReduceResult<Vec<(String, u64)>> {
    driver.map_only(lines, |line: &String| map(line))
}
