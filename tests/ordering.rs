// tests/ordering.rs
use anyhow::Result;
use ironreduce::jobs::word_count;
use ironreduce::testing::*;
use ironreduce::{ExecMode, MapReduce};

fn generated_lines(n: usize) -> Vec<String> {
    let vocab = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"];
    (0..n)
        .map(|i| {
            (0..(i % 5) + 1)
                .map(|j| vocab[(i * 3 + j * 5) % vocab.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort();
    v
}

#[test]
fn sequential_and_parallel_agree_exactly() -> Result<()> {
    let lines = generated_lines(200);
    for mappers in 1..=5 {
        for reducers in 1..=4 {
            let [seq, par] = both_modes(mappers, reducers)?;
            let s = word_count::run(&seq, &lines)?;
            let p = word_count::run(&par, &lines)?;
            assert_collections_equal(&p, &s);

            let s = word_count::run_map_only(&seq, &lines)?;
            let p = word_count::run_map_only(&par, &lines)?;
            assert_collections_equal(&p, &s);
        }
    }
    Ok(())
}

#[test]
fn result_set_does_not_depend_on_budgets() -> Result<()> {
    let lines = generated_lines(97);
    let baseline = sorted(word_count::run(&MapReduce::new(1, 1)?, &lines)?);
    for mappers in [2, 3, 7, 16, 200] {
        for reducers in [2, 5, 11] {
            let mr = MapReduce::new(mappers, reducers)?;
            assert_eq!(sorted(word_count::run(&mr, &lines)?), baseline);
        }
    }
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> Result<()> {
    let lines = generated_lines(120);
    let mr = MapReduce::new(4, 3)?;
    let first = word_count::run(&mr, &lines)?;
    for _ in 0..5 {
        assert_collections_equal(&word_count::run(&mr, &lines)?, &first);
    }
    Ok(())
}

#[test]
fn value_order_is_the_same_in_both_modes() -> Result<()> {
    let data: Vec<u32> = (0..500).collect();
    let run = |mode| {
        MapReduce::new(6, 3)
            .map(|mr| mr.with_mode(mode))
            .and_then(|mr| mr.map_reduce(&data, |&x| vec![(x % 17, x)], |k, vs| (*k, vs)))
    };
    let seq = run(ExecMode::Sequential)?;
    let par = run(ExecMode::Parallel)?;
    assert_collections_equal(&par, &seq);
    Ok(())
}
