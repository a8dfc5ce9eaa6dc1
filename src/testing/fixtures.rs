//! Small datasets the sample jobs are demonstrated and tested on.

use crate::jobs::inverted_index::Document;
use crate::jobs::natural_join::{LEFT, RIGHT, Row};

fn row(fields: &[&str]) -> Row {
    fields.iter().map(|f| (*f).to_string()).collect()
}

/// Three lines of text for word count.
#[must_use]
pub fn sample_lines() -> Vec<String> {
    vec![
        "Hello world this is a test".to_string(),
        "Hello again world of testing".to_string(),
        "Testing is important for world building".to_string(),
    ]
}

/// Three `(file name, text)` documents for the inverted index.
#[must_use]
pub fn sample_documents() -> Vec<Document> {
    vec![
        (
            "file1.txt".to_string(),
            "Hello world this is document one".to_string(),
        ),
        (
            "file2.txt".to_string(),
            "Hello again world of document two".to_string(),
        ),
        (
            "file3.txt".to_string(),
            "Document three has different world".to_string(),
        ),
    ]
}

/// `(category, value)` pairs; totals are A=30, B=45, C=70.
#[must_use]
pub fn sample_category_values() -> Vec<(String, i64)> {
    [
        ("A", 10),
        ("B", 20),
        ("A", 15),
        ("C", 30),
        ("B", 25),
        ("A", 5),
        ("C", 40),
    ]
    .into_iter()
    .map(|(c, v)| (c.to_string(), v))
    .collect()
}

/// Two tables keyed on id: `(id, name)` rows from [`LEFT`] and `(id, dept)` rows
/// from [`RIGHT`]. Ids 1 and 2 join; id 3 exists only on the left and 4 only on
/// the right.
#[must_use]
pub fn sample_join_tables() -> Vec<(u8, Row)> {
    vec![
        (LEFT, row(&["1", "John"])),
        (LEFT, row(&["2", "Jane"])),
        (LEFT, row(&["3", "Bob"])),
        (LEFT, row(&["1", "Johnny"])),
        (RIGHT, row(&["1", "IT"])),
        (RIGHT, row(&["2", "HR"])),
        (RIGHT, row(&["4", "Finance"])),
    ]
}
