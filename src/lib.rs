//! # Ironreduce
//!
//! An in-memory **map-reduce execution engine** for Rust. It partitions an input
//! slice, applies a map function to every item to produce key/value pairs, groups
//! the pairs by key, and applies a reduce function once per distinct key.
//!
//! ## Quick Start
//!
//! ```
//! use ironreduce::MapReduce;
//!
//! # fn main() -> anyhow::Result<()> {
//! let lines = vec!["the quick fox".to_string(), "the lazy dog".to_string()];
//!
//! let mr = MapReduce::new(2, 2)?;
//! let mut counts = mr.map_reduce(
//!     &lines,
//!     |line: &String| line.split_whitespace().map(|w| (w.to_string(), 1u64)).collect(),
//!     |word: &String, ones: Vec<u64>| (word.clone(), ones.len() as u64),
//! )?;
//! counts.sort();
//! assert_eq!(counts[4], ("the".to_string(), 2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Job driver
//!
//! A [`MapReduce`] holds a mapper budget and a reducer budget (both `>= 1`) and
//! exposes two entry points:
//! - [`map_reduce`](MapReduce::map_reduce) / [`try_map_reduce`](MapReduce::try_map_reduce):
//!   partition → map → shuffle → reduce
//! - [`map_only`](MapReduce::map_only) / [`try_map_only`](MapReduce::try_map_only):
//!   partition → map, returning the flattened pairs
//!
//! ### Phases
//!
//! 1. [`partition`](partition::partition) deals items round-robin into
//!    `mappers` partitions (item `i` → partition `i % mappers`).
//! 2. [`map_phase`](map_phase::map_phase) runs one worker per partition.
//! 3. [`shuffle`](shuffle::shuffle) routes pairs into `reducers` key shards by a
//!    stable hash and groups each shard, preserving partition-then-emission order
//!    of values.
//! 4. [`reduce_phase`](reduce_phase::reduce_phase) runs one worker per shard,
//!    calling the reduce function exactly once per key.
//!
//! ### Ordering
//!
//! Values for a key always arrive in partition order, then emission order.
//! Results come out shard by shard, each shard in the order its keys were first
//! seen. With one reducer that is the global first-seen key order. Sequential and
//! parallel execution produce identical output.
//!
//! ### Failures
//!
//! Job functions fail by returning an error (or panicking). The first failure in
//! a phase cancels the other workers of that phase and the job returns a
//! [`MapReduceError`] naming the item or key. No partial results are returned.
//!
//! ## Module Overview
//!
//! - [`driver`] - the [`MapReduce`] job driver
//! - [`config`] - [`JobConfig`] and [`ExecMode`]
//! - [`error`] - [`MapReduceError`]
//! - [`metrics`] - per-job counters and phase timings
//! - [`jobs`] - word count, inverted index, natural join, sum by category
//! - [`io`] - file input and result output for the CLI
//! - [`testing`] - assertions and fixtures for tests

pub mod config;
pub mod driver;
pub mod error;
pub mod io;
pub mod jobs;
pub mod map_phase;
pub mod metrics;
pub mod partition;
pub mod reduce_phase;
pub mod shuffle;
pub mod testing;
pub mod workers;

pub use config::{ExecMode, JobConfig};
pub use driver::MapReduce;
pub use error::{MapReduceError, MapReduceResult, Phase};
pub use metrics::MetricsCollector;
pub use partition::Partition;
pub use shuffle::GroupTable;
