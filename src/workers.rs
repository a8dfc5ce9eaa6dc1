//! Worker scheduling shared by the map, shuffle and reduce phases.
//!
//! A phase is a list of independent inputs (partitions or shards), each handed to
//! one worker. In [`ExecMode::Parallel`] the workers run on the rayon pool and the
//! call returns only once every worker has finished, which is the barrier between
//! phases. In [`ExecMode::Sequential`] they run one after another on the caller.
//!
//! Fallible phases go through [`run_workers`]: the first worker to fail trips a
//! shared [`FailFast`] guard, its siblings stop at their next item, and the phase
//! returns that first error and nothing else.

use crate::config::ExecMode;
use crate::error::{MapReduceError, MapReduceResult};
use anyhow::anyhow;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Per-phase cancellation flag plus the slot holding the first failure.
pub struct FailFast {
    tripped: AtomicBool,
    first: Mutex<Option<MapReduceError>>,
}

impl FailFast {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tripped: AtomicBool::new(false),
            first: Mutex::new(None),
        }
    }

    /// Whether some worker in this phase has already failed.
    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Record a failure and cancel the phase. Only the first error is kept.
    pub fn trip(&self, err: MapReduceError) {
        let mut slot = self.first.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
        drop(slot);
        self.tripped.store(true, Ordering::Release);
    }

    /// Consume the guard, yielding the first recorded failure if any.
    #[must_use]
    pub fn into_error(self) -> Option<MapReduceError> {
        self.first
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FailFast {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one infallible worker per input and collect outputs in input order.
pub fn run_each<I, O, F>(mode: ExecMode, inputs: Vec<I>, worker: F) -> Vec<O>
where
    I: Send,
    O: Send,
    F: Fn(I) -> O + Sync,
{
    match mode {
        ExecMode::Sequential => inputs.into_iter().map(&worker).collect(),
        ExecMode::Parallel => inputs.into_par_iter().map(&worker).collect(),
    }
}

/// Run one fail-fast worker per input and collect outputs in input order.
///
/// A worker returns `None` after tripping the guard or after noticing it was
/// tripped by a sibling. Any trip turns the whole phase into the first error.
///
/// # Errors
///
/// Returns the first [`MapReduceError`] recorded by any worker.
pub fn run_workers<I, O, F>(mode: ExecMode, inputs: Vec<I>, worker: F) -> MapReduceResult<Vec<O>>
where
    I: Send,
    O: Send,
    F: Fn(I, &FailFast) -> Option<O> + Sync,
{
    let guard = FailFast::new();
    let outputs: Option<Vec<O>> = match mode {
        ExecMode::Sequential => inputs.into_iter().map(|i| worker(i, &guard)).collect(),
        ExecMode::Parallel => inputs.into_par_iter().map(|i| worker(i, &guard)).collect(),
    };
    match guard.into_error() {
        Some(err) => Err(err),
        None => Ok(outputs.unwrap_or_default()),
    }
}

/// Call a job function, turning a panic into an error carrying its message.
///
/// # Errors
///
/// Returns the function's own error, or `panicked: <message>` if it panicked.
pub fn call_guarded<R>(f: impl FnOnce() -> anyhow::Result<R>) -> anyhow::Result<R> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(anyhow!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
