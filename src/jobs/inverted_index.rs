//! Inverted index: for each token, the documents it appears in.

use crate::MapReduce;
use crate::error::MapReduceResult;
use crate::jobs::tokenize;
use std::collections::HashSet;

/// A `(document name, document text)` input item.
pub type Document = (String, String);

/// Emit `(token, document name)` for every token in the document.
#[must_use]
pub fn map(doc: &Document) -> Vec<(String, String)> {
    let (name, text) = doc;
    tokenize(text).map(|token| (token, name.clone())).collect()
}

/// De-duplicate the document names for `word`, keeping first-seen order.
#[must_use]
pub fn reduce(word: &str, names: Vec<String>) -> (String, Vec<String>) {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let unique: Vec<String> = names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect();
    (word.to_string(), unique)
}

/// Build the index over `docs`.
///
/// # Errors
///
/// Returns a [`MapReduceError`](crate::MapReduceError) if a worker fails.
pub fn run(driver: &MapReduce, docs: &[Document]) -> MapReduceResult<Vec<(String, Vec<String>)>> {
    driver.map_reduce(docs, map, |word: &String, names| reduce(word, names))
}
