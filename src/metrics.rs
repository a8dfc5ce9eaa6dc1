//! Metrics collection and reporting for job execution.
//!
//! A [`MetricsCollector`] is attached to a driver with
//! [`MapReduce::with_metrics`](crate::MapReduce::with_metrics). Every job the
//! driver runs then records its element counts and phase timings into it:
//!
//! | name | kind | meaning |
//! |---|---|---|
//! | `input_items` | counter | items in the input sequence |
//! | `partitions` | counter | map partitions (the mapper budget) |
//! | `emitted_pairs` | counter | key/value pairs produced by the map phase |
//! | `distinct_keys` | counter | groups handed to the reduce phase |
//! | `shards` | counter | key shards (the reducer budget) |
//! | `results` | counter | results produced by the reduce phase |
//! | `map_phase_ms` | gauge | map phase wall time |
//! | `shuffle_phase_ms` | gauge | grouping wall time |
//! | `reduce_phase_ms` | gauge | reduce phase wall time |
//!
//! Counters accumulate across jobs; gauges hold the latest job's value.
//!
//! ```no_run
//! use ironreduce::MapReduce;
//! use ironreduce::metrics::MetricsCollector;
//!
//! # fn main() -> anyhow::Result<()> {
//! let metrics = MetricsCollector::new();
//! let mr = MapReduce::new(2, 2)?.with_metrics(metrics.clone());
//! let lines = vec!["a b".to_string(), "b c".to_string()];
//! ironreduce::jobs::word_count::run(&mr, &lines)?;
//! metrics.print();
//! metrics.save_to_file("metrics.json")?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::any::Any;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A named reading stored in a [`MetricsCollector`].
pub trait Metric: Send + Sync + Any {
    fn name(&self) -> &str;

    /// Current reading, as JSON.
    fn value(&self) -> Value;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Lets the collector update a concrete metric in place.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Shared, cloneable handle to a set of named metrics.
///
/// Clones record into the same registry, so the caller keeps one handle and the
/// driver another.
#[derive(Clone, Default)]
pub struct MetricsCollector {
    registry: Arc<Mutex<Registry>>,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<String, Box<dyn Metric>>,
    started: Option<Instant>,
    finished: Option<Instant>,
}

impl Registry {
    fn job_time(&self) -> Option<Duration> {
        Some(self.finished?.saturating_duration_since(self.started?))
    }
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `metric` under its name, replacing any previous entry.
    pub fn register(&self, metric: Box<dyn Metric>) {
        let name = metric.name().to_string();
        self.lock().entries.insert(name, metric);
    }

    /// Mark the start of a job.
    pub fn record_start(&self) {
        self.lock().started = Some(Instant::now());
    }

    /// Mark the successful end of a job.
    pub fn record_end(&self) {
        self.lock().finished = Some(Instant::now());
    }

    /// Time between the last [`record_start`](Self::record_start) and
    /// [`record_end`](Self::record_end), if both happened.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.lock().job_time()
    }

    /// Add `value` to a counter, creating it at `value` if missing.
    ///
    /// A non-counter metric under the same name is replaced.
    pub fn increment_counter(&self, name: &str, value: u64) {
        let mut registry = self.lock();
        let existing = registry
            .entries
            .get_mut(name)
            .and_then(|m| m.as_any_mut().downcast_mut::<CounterMetric>());
        match existing {
            Some(counter) => counter.count += value,
            None => {
                registry
                    .entries
                    .insert(name.to_string(), Box::new(CounterMetric::with_value(name, value)));
            }
        }
    }

    pub fn set_counter(&self, name: &str, value: u64) {
        self.register(Box::new(CounterMetric::with_value(name, value)));
    }

    pub fn set_gauge(&self, name: &str, value: f64) {
        self.register(Box::new(GaugeMetric::new(name, value)));
    }

    /// `{ name: { "value": .., "description": .. } }` for every metric, plus
    /// `execution_time_ms` once a job has finished.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let registry = self.lock();
        let mut out: Map<String, Value> = registry
            .entries
            .iter()
            .map(|(name, metric)| {
                let entry = match metric.description() {
                    Some(desc) => json!({ "value": metric.value(), "description": desc }),
                    None => json!({ "value": metric.value() }),
                };
                (name.clone(), entry)
            })
            .collect();
        if let Some(job_time) = registry.job_time() {
            out.insert(
                "execution_time_ms".to_string(),
                json!({
                    "value": job_time.as_millis(),
                    "description": "Wall time of the last successful job in milliseconds",
                }),
            );
        }
        Value::Object(out)
    }

    /// Print every metric to stdout, sorted by name.
    pub fn print(&self) {
        println!("\n---------- ironreduce job metrics ----------");
        if let Some(job_time) = self.elapsed() {
            println!("job time: {} ms", job_time.as_millis());
        }
        for (name, value) in self.sorted_snapshot() {
            println!("{name:>20}: {value}");
        }
        println!("--------------------------------------------\n");
    }

    /// Write [`to_json`](Self::to_json) to `path`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(&self.to_json())?;
        fs::write(path, text).with_context(|| format!("write metrics {}", path.display()))
    }

    /// Current value of every metric, keyed by name.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.lock()
            .entries
            .iter()
            .map(|(name, metric)| (name.clone(), metric.value()))
            .collect()
    }

    fn sorted_snapshot(&self) -> Vec<(String, Value)> {
        let mut entries: Vec<(String, Value)> = self.snapshot().into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// A count that only grows.
pub struct CounterMetric {
    name: String,
    count: u64,
}

impl CounterMetric {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, 0)
    }

    pub fn with_value(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

impl Metric for CounterMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        Value::from(self.count)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A single reading, overwritten on every update.
pub struct GaugeMetric {
    name: String,
    reading: f64,
    note: Option<String>,
}

impl GaugeMetric {
    pub fn new(name: impl Into<String>, reading: f64) -> Self {
        Self {
            name: name.into(),
            reading,
            note: None,
        }
    }

    #[must_use]
    pub fn with_description(self, note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..self
        }
    }
}

impl Metric for GaugeMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        json!(self.reading)
    }

    fn description(&self) -> Option<&str> {
        self.note.as_deref()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
