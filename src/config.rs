//! Job configuration: worker budgets and execution mode.
//!
//! A [`JobConfig`] is immutable once validated. It can be built in code or loaded
//! from a JSON file:
//!
//! ```json
//! { "mappers": 4, "reducers": 2, "mode": "sequential" }
//! ```
//!
//! Missing fields take their defaults (one mapper, one reducer, parallel mode).

use crate::error::{MapReduceError, MapReduceResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the phases of a job are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecMode {
    /// Every phase runs on the calling thread, one partition/shard at a time.
    Sequential,
    /// Map workers, shard grouping and reduce workers run on the rayon pool.
    #[default]
    Parallel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Number of map partitions (and concurrent map workers).
    pub mappers: usize,
    /// Number of key shards (and concurrent reduce workers).
    pub reducers: usize,
    pub mode: ExecMode,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            mappers: 1,
            reducers: 1,
            mode: ExecMode::Parallel,
        }
    }
}

impl JobConfig {
    /// Build a validated config in parallel mode.
    ///
    /// # Errors
    ///
    /// Returns [`MapReduceError::InvalidConfiguration`] if either budget is zero.
    pub fn new(mappers: usize, reducers: usize) -> MapReduceResult<Self> {
        let config = Self {
            mappers,
            reducers,
            mode: ExecMode::Parallel,
        };
        config.validate()?;
        Ok(config)
    }

    /// One mapper and one reducer per logical CPU.
    #[must_use]
    pub fn available_parallelism() -> Self {
        let cpus = num_cpus::get().max(1);
        Self {
            mappers: cpus,
            reducers: cpus,
            mode: ExecMode::Parallel,
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check both worker budgets are at least one.
    ///
    /// # Errors
    ///
    /// Returns [`MapReduceError::InvalidConfiguration`] if either budget is zero.
    pub const fn validate(&self) -> MapReduceResult<()> {
        if self.mappers < 1 || self.reducers < 1 {
            return Err(MapReduceError::InvalidConfiguration {
                mappers: self.mappers,
                reducers: self.reducers,
            });
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON for a
    /// `JobConfig`, or fails [`validate`](Self::validate).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}
