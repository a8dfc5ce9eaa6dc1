//! Sample jobs built on the [`MapReduce`](crate::MapReduce) driver.
//!
//! Each job module exposes its map and reduce functions separately (so they can
//! be tested or reused on their own) plus a `run` helper that wires them into a
//! driver.

pub mod inverted_index;
pub mod natural_join;
pub mod sum_by_category;
pub mod word_count;

/// Characters stripped from both ends of every token.
pub const PUNCTUATION: &[char] = &['.', ',', '!', '?', '"', ';'];

/// Split `text` on whitespace into lowercase tokens with surrounding
/// [`PUNCTUATION`] removed.
///
/// A token made only of punctuation becomes the empty string and is still
/// yielded, so `"..."` counts as an occurrence of `""`.
///
/// ```
/// use ironreduce::jobs::tokenize;
///
/// let tokens: Vec<String> = tokenize("Hello, World! ... \"quoted\";").collect();
/// assert_eq!(tokens, vec!["hello", "world", "", "quoted"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|word| word.to_lowercase().trim_matches(PUNCTUATION).to_string())
}
