//! Shuffle: regroup emitted pairs by key.
//!
//! [`group`] is the single-pass grouping: it walks partitions in order, then
//! each partition's pairs in order, appending each value to its key's list.
//! [`shuffle`] does the same work split across `reducers` key shards so that each
//! shard can be grouped (and later reduced) by its own worker. A key always lands
//! in shard [`shard_of`]`(key, reducers)`, and every shard sees the pairs for its
//! keys in the same partition-then-emission order as [`group`] would.

use crate::config::ExecMode;
use crate::workers::run_each;
use std::collections::HashMap;
use std::collections::hash_map::{DefaultHasher, Entry};
use std::hash::{Hash, Hasher};

/// Key → values table that remembers the order keys were first seen.
#[derive(Debug, Clone)]
pub struct GroupTable<K, V> {
    slots: HashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K, V> GroupTable<K, V> {
    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(k, _)| k)
    }

    /// Groups in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(k, vs)| (k, vs.as_slice()))
    }

    /// Total number of values across all keys.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.groups.iter().map(|(_, vs)| vs.len()).sum()
    }

    /// Consume the table into `(key, values)` groups in first-insertion order.
    #[must_use]
    pub fn into_groups(self) -> Vec<(K, Vec<V>)> {
        self.groups
    }
}

impl<K: Eq + Hash + Clone, V> GroupTable<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Append `value` to `key`'s list, creating the entry on first sight.
    pub fn push(&mut self, key: K, value: V) {
        match self.slots.entry(key) {
            Entry::Occupied(slot) => self.groups[*slot.get()].1.push(value),
            Entry::Vacant(slot) => {
                let idx = self.groups.len();
                self.groups.push((slot.key().clone(), vec![value]));
                slot.insert(idx);
            }
        }
    }

    /// Values recorded for `key`, in emission order.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.slots.get(key).map(|&idx| self.groups[idx].1.as_slice())
    }
}

impl<K: Eq + Hash + Clone, V> Default for GroupTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for GroupTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.push(k, v);
        }
        table
    }
}

impl<K, V> IntoIterator for GroupTable<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = std::vec::IntoIter<(K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Stable shard index for `key` in `0..shards`.
///
/// Uses `DefaultHasher::new()`, whose keys are fixed, so the assignment is the
/// same on every run of the same binary.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn shard_of<K: Hash + ?Sized>(key: &K, shards: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % shards.max(1) as u64) as usize
}

/// Group per-partition pairs into one table.
#[must_use]
pub fn group<K, V>(per_partition: Vec<Vec<(K, V)>>) -> GroupTable<K, V>
where
    K: Eq + Hash + Clone,
{
    per_partition.into_iter().flatten().collect()
}

/// Group per-partition pairs into `reducers` key shards.
///
/// Each partition's output is first split into shard buckets (one worker per
/// partition); then each shard merges its buckets in partition order (one worker
/// per shard). Concatenating the shards' groups in shard order gives every key
/// exactly once, with the same value list [`group`] would produce.
#[must_use]
pub fn shuffle<K, V>(
    per_partition: Vec<Vec<(K, V)>>,
    reducers: usize,
    mode: ExecMode,
) -> Vec<GroupTable<K, V>>
where
    K: Eq + Hash + Clone + Send,
    V: Send,
{
    let shards = reducers.max(1);
    let bucketed = run_each(mode, per_partition, |pairs| split_into_shards(pairs, shards));

    let mut per_shard: Vec<Vec<Vec<(K, V)>>> = (0..shards)
        .map(|_| Vec::with_capacity(bucketed.len()))
        .collect();
    for buckets in bucketed {
        for (shard, bucket) in buckets.into_iter().enumerate() {
            per_shard[shard].push(bucket);
        }
    }

    run_each(mode, per_shard, group::<K, V>)
}

fn split_into_shards<K: Hash, V>(pairs: Vec<(K, V)>, shards: usize) -> Vec<Vec<(K, V)>> {
    let mut buckets: Vec<Vec<(K, V)>> = (0..shards).map(|_| Vec::new()).collect();
    for (k, v) in pairs {
        buckets[shard_of(&k, shards)].push((k, v));
    }
    buckets
}
