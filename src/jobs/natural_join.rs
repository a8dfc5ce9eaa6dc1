//! Natural join of two tables on their first column.
//!
//! Input items are `(table_id, row)`. Rows from [`LEFT`] and [`RIGHT`] that share
//! a join key are combined pairwise; a key with rows on only one side produces
//! nothing. Rows tagged with any other table id are ignored.

use crate::MapReduce;
use crate::error::MapReduceResult;
use anyhow::bail;

pub const LEFT: u8 = 1;
pub const RIGHT: u8 = 2;

/// One table row: join key first, then the remaining columns.
pub type Row = Vec<String>;

/// A row's non-key columns tagged with the table they came from.
pub type Tagged = (u8, Row);

/// Emit `(row[0], (table_id, row[1..]))`.
///
/// # Errors
///
/// Fails on an empty row, which has no join key.
pub fn map(item: &(u8, Row)) -> anyhow::Result<Vec<(String, Tagged)>> {
    let (table, row) = item;
    let Some((key, rest)) = row.split_first() else {
        bail!("row from table {table} has no join key column");
    };
    Ok(vec![(key.clone(), (*table, rest.to_vec()))])
}

/// Every `[key, left columns..., right columns...]` combination for `key`.
#[must_use]
pub fn reduce(key: &str, tagged: Vec<Tagged>) -> Vec<Row> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (table, row) in tagged {
        match table {
            LEFT => left.push(row),
            RIGHT => right.push(row),
            _ => {}
        }
    }

    let mut joined = Vec::with_capacity(left.len() * right.len());
    for l in &left {
        for r in &right {
            let mut row = Vec::with_capacity(1 + l.len() + r.len());
            row.push(key.to_string());
            row.extend(l.iter().cloned());
            row.extend(r.iter().cloned());
            joined.push(row);
        }
    }
    joined
}

/// Join the tables in `rows`, returning all joined rows in key order.
///
/// # Errors
///
/// Returns a [`MapReduceError`](crate::MapReduceError) if a row has no join key
/// or a worker fails.
pub fn run(driver: &MapReduce, rows: &[(u8, Row)]) -> MapReduceResult<Vec<Row>> {
    let per_key = driver.try_map_reduce(rows, map, |key: &String, tagged| Ok(reduce(key, tagged)))?;
    Ok(per_key.into_iter().flatten().collect())
}
