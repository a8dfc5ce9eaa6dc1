// tests/partition.rs
use ironreduce::partition::partition;

#[test]
fn every_item_lands_in_exactly_one_partition() {
    for mappers in 1..=7 {
        for len in [0usize, 1, 5, 13, 64] {
            let data: Vec<usize> = (0..len).collect();
            let parts = partition(&data, mappers);
            assert_eq!(parts.len(), mappers, "mappers={mappers} len={len}");

            let mut seen: Vec<usize> = parts.iter().flat_map(|p| p.indices()).collect();
            seen.sort_unstable();
            assert_eq!(seen, data, "mappers={mappers} len={len}");
        }
    }
}

#[test]
fn round_robin_assignment_keeps_input_order() {
    let data: Vec<char> = "abcdefgh".chars().collect();
    let parts = partition(&data, 3);

    for (p, part) in parts.iter().enumerate() {
        assert_eq!(part.index, p);
        for (idx, item) in &part.items {
            assert_eq!(idx % 3, p);
            assert_eq!(**item, data[*idx]);
        }
        let indices: Vec<usize> = part.indices().collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    let firsts: Vec<char> = parts[0].items.iter().map(|(_, c)| **c).collect();
    assert_eq!(firsts, vec!['a', 'd', 'g']);
    let seconds: Vec<char> = parts[1].items.iter().map(|(_, c)| **c).collect();
    assert_eq!(seconds, vec!['b', 'e', 'h']);
    let thirds: Vec<char> = parts[2].items.iter().map(|(_, c)| **c).collect();
    assert_eq!(thirds, vec!['c', 'f']);
}

#[test]
fn more_mappers_than_items_leaves_empty_partitions() {
    let data = vec![10, 20];
    let parts = partition(&data, 5);
    assert_eq!(parts.len(), 5);
    assert_eq!(parts[0].len(), 1);
    assert_eq!(parts[1].len(), 1);
    assert!(parts[2..].iter().all(|p| p.is_empty()));
}

#[test]
fn empty_input_gives_empty_partitions() {
    let data: Vec<u8> = Vec::new();
    let parts = partition(&data, 4);
    assert_eq!(parts.len(), 4);
    assert!(parts.iter().all(|p| p.is_empty()));
}
