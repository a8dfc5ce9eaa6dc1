//! Sum numeric values per category.

use crate::MapReduce;
use crate::error::MapReduceResult;

#[must_use]
pub fn map(item: &(String, i64)) -> Vec<(String, i64)> {
    vec![item.clone()]
}

#[must_use]
pub fn reduce(category: &str, values: Vec<i64>) -> (String, i64) {
    (category.to_string(), values.into_iter().sum())
}

/// # Errors
///
/// Returns a [`MapReduceError`](crate::MapReduceError) if a worker fails.
pub fn run(driver: &MapReduce, items: &[(String, i64)]) -> MapReduceResult<Vec<(String, i64)>> {
    driver.map_reduce(items, map, |category: &String, values| reduce(category, values))
}
