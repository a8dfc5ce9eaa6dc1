//! The job driver: the facade that runs partition → map → shuffle → reduce.
//!
//! [`MapReduce`] owns nothing but its [`JobConfig`] (and, optionally, a metrics
//! handle). Map and reduce functions are supplied per call, so one driver can run
//! any number of different jobs.
//!
//! Infallible job functions go through [`MapReduce::map_reduce`] and
//! [`MapReduce::map_only`]; functions that can fail return [`anyhow::Result`] and
//! go through the `try_` variants. Either way the first failure aborts the job and
//! no partial results are returned.

use crate::config::{ExecMode, JobConfig};
use crate::error::MapReduceResult;
use crate::map_phase::map_phase;
use crate::metrics::MetricsCollector;
use crate::partition::partition;
use crate::reduce_phase::reduce_phase;
use crate::shuffle::shuffle;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct MapReduce {
    config: JobConfig,
    metrics: Option<MetricsCollector>,
}

impl fmt::Debug for MapReduce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapReduce")
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl MapReduce {
    /// A parallel driver with the given mapper and reducer budgets.
    ///
    /// # Errors
    ///
    /// Returns [`MapReduceError::InvalidConfiguration`](crate::MapReduceError::InvalidConfiguration)
    /// if either budget is zero.
    pub fn new(mappers: usize, reducers: usize) -> MapReduceResult<Self> {
        Self::from_config(JobConfig::new(mappers, reducers)?)
    }

    /// # Errors
    ///
    /// Returns [`MapReduceError::InvalidConfiguration`](crate::MapReduceError::InvalidConfiguration)
    /// if either budget in `config` is zero.
    pub fn from_config(config: JobConfig) -> MapReduceResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            metrics: None,
        })
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ExecMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Record counts and phase timings of every job into `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &JobConfig {
        &self.config
    }

    #[must_use]
    pub const fn mappers(&self) -> usize {
        self.config.mappers
    }

    #[must_use]
    pub const fn reducers(&self) -> usize {
        self.config.reducers
    }

    #[must_use]
    pub const fn mode(&self) -> ExecMode {
        self.config.mode
    }

    /// Run a full job with infallible map and reduce functions.
    ///
    /// Returns one result per distinct key. Keys come out shard by shard (shard
    /// order), each shard in first-seen order; with one reducer that is simply the
    /// order keys were first emitted.
    ///
    /// ```
    /// use ironreduce::MapReduce;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let mr = MapReduce::new(2, 1)?;
    /// let data = vec![("a", 1), ("b", 2), ("a", 3)];
    /// let sums = mr.map_reduce(
    ///     &data,
    ///     |&(k, v)| vec![(k, v)],
    ///     |k, vs| (*k, vs.iter().sum::<i32>()),
    /// )?;
    /// assert_eq!(sums, vec![("a", 4), ("b", 2)]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a map or reduce failure if a job function panics.
    pub fn map_reduce<T, K, V, R, M, Rd>(
        &self,
        data: &[T],
        map_fn: M,
        reduce_fn: Rd,
    ) -> MapReduceResult<Vec<R>>
    where
        T: Sync + Debug,
        K: Eq + Hash + Clone + Send + Debug,
        V: Send,
        R: Send,
        M: Fn(&T) -> Vec<(K, V)> + Sync,
        Rd: Fn(&K, Vec<V>) -> R + Sync,
    {
        self.try_map_reduce(
            data,
            |item| Ok(map_fn(item)),
            |key, values| Ok(reduce_fn(key, values)),
        )
    }

    /// Run a full job with fallible map and reduce functions.
    ///
    /// # Errors
    ///
    /// Returns the first [`MapFunctionFailure`](crate::MapReduceError::MapFunctionFailure)
    /// or [`ReduceFunctionFailure`](crate::MapReduceError::ReduceFunctionFailure).
    pub fn try_map_reduce<T, K, V, R, M, Rd>(
        &self,
        data: &[T],
        map_fn: M,
        reduce_fn: Rd,
    ) -> MapReduceResult<Vec<R>>
    where
        T: Sync + Debug,
        K: Eq + Hash + Clone + Send + Debug,
        V: Send,
        R: Send,
        M: Fn(&T) -> anyhow::Result<Vec<(K, V)>> + Sync,
        Rd: Fn(&K, Vec<V>) -> anyhow::Result<R> + Sync,
    {
        let JobConfig {
            mappers,
            reducers,
            mode,
        } = self.config;
        self.record_start();

        let started = Instant::now();
        let per_partition = self.run_map(data, &map_fn)?;
        let emitted: usize = per_partition.iter().map(Vec::len).sum();
        self.record_phase("map_phase_ms", started);

        let started = Instant::now();
        let shards = shuffle(per_partition, reducers, mode);
        let distinct_keys: usize = shards.iter().map(|s| s.len()).sum();
        debug!(emitted, distinct_keys, shards = reducers, "shuffle complete");
        self.record_phase("shuffle_phase_ms", started);

        let started = Instant::now();
        let results = reduce_phase(shards, &reduce_fn, mode).inspect_err(|err| {
            warn!(error = %err, "reduce phase failed");
        })?;
        self.record_phase("reduce_phase_ms", started);
        debug!(results = results.len(), "reduce complete");

        if let Some(metrics) = &self.metrics {
            metrics.increment_counter("emitted_pairs", emitted as u64);
            metrics.increment_counter("distinct_keys", distinct_keys as u64);
            metrics.increment_counter("shards", reducers as u64);
            metrics.increment_counter("results", results.len() as u64);
            metrics.record_end();
        }
        debug!(mappers, reducers, ?mode, "job complete");
        Ok(results)
    }

    /// Run only the map phase with an infallible map function.
    ///
    /// Returns every emitted pair, partition by partition, in emission order,
    /// without grouping.
    ///
    /// # Errors
    ///
    /// Returns a map failure if the map function panics.
    pub fn map_only<T, K, V, M>(&self, data: &[T], map_fn: M) -> MapReduceResult<Vec<(K, V)>>
    where
        T: Sync + Debug,
        K: Send,
        V: Send,
        M: Fn(&T) -> Vec<(K, V)> + Sync,
    {
        self.try_map_only(data, |item| Ok(map_fn(item)))
    }

    /// Run only the map phase with a fallible map function.
    ///
    /// # Errors
    ///
    /// Returns the first [`MapFunctionFailure`](crate::MapReduceError::MapFunctionFailure).
    pub fn try_map_only<T, K, V, M>(&self, data: &[T], map_fn: M) -> MapReduceResult<Vec<(K, V)>>
    where
        T: Sync + Debug,
        K: Send,
        V: Send,
        M: Fn(&T) -> anyhow::Result<Vec<(K, V)>> + Sync,
    {
        self.record_start();
        let started = Instant::now();
        let per_partition = self.run_map(data, &map_fn)?;
        let pairs: Vec<(K, V)> = per_partition.into_iter().flatten().collect();
        self.record_phase("map_phase_ms", started);
        if let Some(metrics) = &self.metrics {
            metrics.increment_counter("emitted_pairs", pairs.len() as u64);
            metrics.record_end();
        }
        debug!(emitted = pairs.len(), "map-only job complete");
        Ok(pairs)
    }

    fn run_map<T, K, V, M>(&self, data: &[T], map_fn: &M) -> MapReduceResult<Vec<Vec<(K, V)>>>
    where
        T: Sync + Debug,
        K: Send,
        V: Send,
        M: Fn(&T) -> anyhow::Result<Vec<(K, V)>> + Sync,
    {
        let partitions = partition(data, self.config.mappers);
        debug!(
            items = data.len(),
            partitions = partitions.len(),
            mode = ?self.config.mode,
            "map phase starting"
        );
        if let Some(metrics) = &self.metrics {
            metrics.increment_counter("input_items", data.len() as u64);
            metrics.increment_counter("partitions", partitions.len() as u64);
        }
        map_phase(partitions, map_fn, self.config.mode).inspect_err(|err| {
            warn!(error = %err, "map phase failed");
        })
    }

    fn record_start(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.record_start();
        }
    }

    fn record_phase(&self, name: &str, started: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.set_gauge(name, started.elapsed().as_secs_f64() * 1000.0);
        }
    }
}
