//! Reduce phase: one worker per key shard.

use crate::config::ExecMode;
use crate::error::{MapReduceError, MapReduceResult};
use crate::shuffle::GroupTable;
use crate::workers::{FailFast, call_guarded, run_workers};
use std::fmt::Debug;
use tracing::trace;

/// Invoke `reduce_fn` exactly once per key.
///
/// Results come out shard by shard in shard order, and within a shard in the
/// order its keys were first seen. With a single shard this is the global
/// first-seen key order.
///
/// # Errors
///
/// Returns [`MapReduceError::ReduceFunctionFailure`] for the first key on which
/// `reduce_fn` fails or panics; the remaining reduce workers are cancelled.
pub fn reduce_phase<K, V, R, F>(
    shards: Vec<GroupTable<K, V>>,
    reduce_fn: &F,
    mode: ExecMode,
) -> MapReduceResult<Vec<R>>
where
    K: Send + Debug,
    V: Send,
    R: Send,
    F: Fn(&K, Vec<V>) -> anyhow::Result<R> + Sync,
{
    let inputs: Vec<(usize, GroupTable<K, V>)> = shards.into_iter().enumerate().collect();
    let per_shard = run_workers(mode, inputs, |(shard, table), guard| {
        reduce_shard(shard, table, reduce_fn, guard)
    })?;
    Ok(per_shard.into_iter().flatten().collect())
}

fn reduce_shard<K, V, R, F>(
    shard: usize,
    table: GroupTable<K, V>,
    reduce_fn: &F,
    guard: &FailFast,
) -> Option<Vec<R>>
where
    K: Debug,
    F: Fn(&K, Vec<V>) -> anyhow::Result<R>,
{
    trace!(shard, keys = table.len(), "reducer started");
    let mut out = Vec::with_capacity(table.len());
    for (key, values) in table {
        if guard.is_tripped() {
            trace!(shard, "reducer cancelled");
            return None;
        }
        match call_guarded(|| reduce_fn(&key, values)) {
            Ok(result) => out.push(result),
            Err(source) => {
                guard.trip(MapReduceError::ReduceFunctionFailure {
                    shard,
                    key: format!("{key:?}"),
                    source,
                });
                return None;
            }
        }
    }
    Some(out)
}
