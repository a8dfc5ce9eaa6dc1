//! Map phase: one worker per partition.

use crate::config::ExecMode;
use crate::error::{MapReduceError, MapReduceResult};
use crate::partition::Partition;
use crate::workers::{FailFast, call_guarded, run_workers};
use std::fmt::Debug;
use tracing::trace;

/// Apply `map_fn` to every item of every partition.
///
/// Returns one list of emitted pairs per partition, in partition order. Within a
/// list, pairs appear in item order and then in the order `map_fn` returned them.
///
/// # Errors
///
/// Returns [`MapReduceError::MapFunctionFailure`] for the first item on which
/// `map_fn` fails or panics; the remaining map workers are cancelled.
pub fn map_phase<T, K, V, F>(
    partitions: Vec<Partition<'_, T>>,
    map_fn: &F,
    mode: ExecMode,
) -> MapReduceResult<Vec<Vec<(K, V)>>>
where
    T: Sync + Debug,
    K: Send,
    V: Send,
    F: Fn(&T) -> anyhow::Result<Vec<(K, V)>> + Sync,
{
    run_workers(mode, partitions, |part, guard| map_partition(part, map_fn, guard))
}

fn map_partition<T, K, V, F>(
    part: Partition<'_, T>,
    map_fn: &F,
    guard: &FailFast,
) -> Option<Vec<(K, V)>>
where
    T: Debug,
    F: Fn(&T) -> anyhow::Result<Vec<(K, V)>>,
{
    trace!(partition = part.index, items = part.len(), "mapper started");
    let mut out = Vec::with_capacity(part.len());
    for (index, item) in part.items {
        if guard.is_tripped() {
            trace!(partition = part.index, "mapper cancelled");
            return None;
        }
        match call_guarded(|| map_fn(item)) {
            Ok(pairs) => out.extend(pairs),
            Err(source) => {
                guard.trip(MapReduceError::MapFunctionFailure {
                    partition: part.index,
                    index,
                    item: format!("{item:?}"),
                    source,
                });
                return None;
            }
        }
    }
    trace!(partition = part.index, pairs = out.len(), "mapper finished");
    Some(out)
}
