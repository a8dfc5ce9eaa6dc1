// tests/shuffle.rs
use ironreduce::ExecMode;
use ironreduce::shuffle::{GroupTable, group, shard_of, shuffle};

fn sample_per_partition() -> Vec<Vec<(String, usize)>> {
    let words = ["a", "b", "c", "a", "d", "b", "e", "a", "f", "g", "c", "h"];
    let mut parts = vec![Vec::new(), Vec::new(), Vec::new()];
    for (i, w) in words.iter().enumerate() {
        parts[i % 3].push(((*w).to_string(), i));
    }
    parts
}

#[test]
fn group_table_keeps_first_seen_key_order() {
    let mut table = GroupTable::new();
    table.push("x", 1);
    table.push("y", 2);
    table.push("x", 3);
    table.push("z", 4);

    assert_eq!(table.len(), 3);
    assert_eq!(table.value_count(), 4);
    assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    assert_eq!(table.get(&"x"), Some(&[1, 3][..]));
    assert_eq!(table.get(&"missing"), None);
    assert_eq!(
        table.into_groups(),
        vec![("x", vec![1, 3]), ("y", vec![2]), ("z", vec![4])]
    );
}

#[test]
fn empty_group_table() {
    let table: GroupTable<String, u32> = GroupTable::default();
    assert!(table.is_empty());
    assert_eq!(table.value_count(), 0);
    assert_eq!(table.into_iter().count(), 0);
}

#[test]
fn group_concatenates_partitions_in_order() {
    let grouped = group(sample_per_partition());
    // partition 0 holds items 0,3,6,9; partition 1 holds 1,4,7,10; partition 2 holds 2,5,8,11
    assert_eq!(grouped.get(&"a".to_string()), Some(&[0, 3, 7][..]));
    assert_eq!(grouped.get(&"c".to_string()), Some(&[10, 2][..]));
    let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "e", "g", "b", "d", "c", "f", "h"]);
}

#[test]
fn shard_of_is_stable_and_in_range() {
    for shards in 1..=8 {
        for key in ["alpha", "beta", "gamma", "", "δ"] {
            let s = shard_of(key, shards);
            assert!(s < shards);
            assert_eq!(s, shard_of(key, shards));
            assert_eq!(s, shard_of(&key.to_string(), shards));
        }
    }
    assert_eq!(shard_of(&42u64, 1), 0);
}

#[test]
fn shuffle_matches_single_group_for_every_reducer_budget() {
    let global = group(sample_per_partition());

    for mode in [ExecMode::Sequential, ExecMode::Parallel] {
        for reducers in 1..=6 {
            let shards = shuffle(sample_per_partition(), reducers, mode);
            assert_eq!(shards.len(), reducers);

            let total_keys: usize = shards.iter().map(GroupTable::len).sum();
            assert_eq!(total_keys, global.len());

            for (s, shard) in shards.iter().enumerate() {
                for (key, values) in shard.iter() {
                    assert_eq!(shard_of(key, reducers), s);
                    assert_eq!(Some(values), global.get(key));
                }
                let expected_order: Vec<&String> = global
                    .keys()
                    .filter(|k| shard_of(*k, reducers) == s)
                    .collect();
                assert_eq!(shard.keys().collect::<Vec<_>>(), expected_order);
            }
        }
    }
}

#[test]
fn shuffle_of_nothing_gives_empty_shards() {
    let shards = shuffle(Vec::<Vec<(u32, u32)>>::new(), 3, ExecMode::Parallel);
    assert_eq!(shards.len(), 3);
    assert!(shards.iter().all(GroupTable::is_empty));
}
