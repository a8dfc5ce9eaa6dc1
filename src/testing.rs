//! Testing utilities for map-reduce jobs.
//!
//! - **Assertions** for comparing job output where key order may legitimately
//!   differ (sharded reduce output is grouped by shard).
//! - **Fixtures**: the small datasets the sample jobs are demonstrated on.
//! - [`both_modes`]: a sequential and a parallel driver with the same budgets,
//!   for checking that parallelism never changes results.
//!
//! ```
//! use ironreduce::jobs::word_count;
//! use ironreduce::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let [seq, par] = both_modes(3, 2)?;
//! let lines = sample_lines();
//! assert_collections_equal(&word_count::run(&seq, &lines)?, &word_count::run(&par, &lines)?);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;

use crate::MapReduce;
use crate::config::ExecMode;
use crate::error::MapReduceResult;

/// A `[sequential, parallel]` pair of drivers with identical budgets.
///
/// # Errors
///
/// Returns [`MapReduceError::InvalidConfiguration`](crate::MapReduceError::InvalidConfiguration)
/// if either budget is zero.
pub fn both_modes(mappers: usize, reducers: usize) -> MapReduceResult<[MapReduce; 2]> {
    let par = MapReduce::new(mappers, reducers)?;
    let seq = par.clone().with_mode(ExecMode::Sequential);
    Ok([seq, par])
}
