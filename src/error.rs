//! Error taxonomy for map-reduce jobs.
//!
//! Every failure the engine can surface is a [`MapReduceError`]. Job functions
//! report their own failures as [`anyhow::Error`]; the engine wraps them with the
//! phase and the offending item or key so the caller can tell *where* a job broke.
//!
//! An empty input is not an error: it produces an empty result sequence.

use std::error::Error;
use std::fmt;

/// The phase of a job in which an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Configuration,
    Map,
    Reduce,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => f.write_str("configuration"),
            Self::Map => f.write_str("map"),
            Self::Reduce => f.write_str("reduce"),
        }
    }
}

/// Error returned by the job driver.
///
/// Map and reduce failures carry the `Debug` rendering of the item or key rather
/// than the value itself, so the error stays `Send + Sync + 'static` for any
/// job types.
#[derive(Debug)]
pub enum MapReduceError {
    /// A worker budget was zero.
    InvalidConfiguration { mappers: usize, reducers: usize },

    /// The map function failed (or panicked) on one input item.
    MapFunctionFailure {
        /// Partition the item was assigned to.
        partition: usize,
        /// Index of the item in the original input sequence.
        index: usize,
        /// `Debug` rendering of the item.
        item: String,
        source: anyhow::Error,
    },

    /// The reduce function failed (or panicked) on one key.
    ReduceFunctionFailure {
        /// Shard that owned the key.
        shard: usize,
        /// `Debug` rendering of the key.
        key: String,
        source: anyhow::Error,
    },
}

impl MapReduceError {
    /// The phase this error belongs to.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::InvalidConfiguration { .. } => Phase::Configuration,
            Self::MapFunctionFailure { .. } => Phase::Map,
            Self::ReduceFunctionFailure { .. } => Phase::Reduce,
        }
    }
}

impl fmt::Display for MapReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { mappers, reducers } => write!(
                f,
                "invalid configuration: mappers={mappers}, reducers={reducers} (both must be >= 1)"
            ),
            Self::MapFunctionFailure {
                partition,
                index,
                item,
                source,
            } => write!(
                f,
                "map function failed on item #{index} {item} (partition {partition}): {source}"
            ),
            Self::ReduceFunctionFailure { shard, key, source } => {
                write!(f, "reduce function failed on key {key} (shard {shard}): {source}")
            }
        }
    }
}

impl Error for MapReduceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfiguration { .. } => None,
            Self::MapFunctionFailure { source, .. } | Self::ReduceFunctionFailure { source, .. } => {
                Some(&**source)
            }
        }
    }
}

pub type MapReduceResult<T> = Result<T, MapReduceError>;
