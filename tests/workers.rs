// tests/workers.rs
use anyhow::{Result, anyhow};
use ironreduce::workers::{FailFast, call_guarded, run_each, run_workers};
use ironreduce::{ExecMode, MapReduceError, Phase};
use std::sync::Mutex;

#[test]
fn run_each_keeps_input_order_in_both_modes() {
    for mode in [ExecMode::Sequential, ExecMode::Parallel] {
        let out = run_each(mode, (0..100).collect(), |x: u32| x * 2);
        assert_eq!(out, (0..100).map(|x| x * 2).collect::<Vec<u32>>());
    }
}

#[test]
fn run_each_accepts_a_worker_that_is_sync_but_not_send() {
    // a MutexGuard may be shared between threads but not moved to another one
    let offset = Mutex::new(10u32);
    for mode in [ExecMode::Sequential, ExecMode::Parallel] {
        let guard = offset.lock().unwrap();
        let out = run_each(mode, vec![1u32, 2, 3], move |x| x + *guard);
        assert_eq!(out, vec![11, 12, 13]);
    }
}

#[test]
fn run_workers_returns_the_tripped_error() {
    for mode in [ExecMode::Sequential, ExecMode::Parallel] {
        let result = run_workers(mode, (0..8).collect::<Vec<usize>>(), |i, guard: &FailFast| {
            if i == 5 {
                guard.trip(MapReduceError::InvalidConfiguration {
                    mappers: i,
                    reducers: 0,
                });
                return None;
            }
            Some(i)
        });
        let err = result.unwrap_err();
        assert_eq!(err.phase(), Phase::Configuration);
    }

    let ok = run_workers(ExecMode::Parallel, vec![1, 2, 3], |i: i32, _: &FailFast| Some(-i));
    assert!(matches!(ok, Ok(v) if v == vec![-1, -2, -3]));
}

#[test]
fn fail_fast_keeps_only_the_first_error() {
    let guard = FailFast::new();
    assert!(!guard.is_tripped());
    guard.trip(MapReduceError::InvalidConfiguration { mappers: 1, reducers: 0 });
    guard.trip(MapReduceError::InvalidConfiguration { mappers: 2, reducers: 0 });
    assert!(guard.is_tripped());
    assert!(matches!(
        guard.into_error(),
        Some(MapReduceError::InvalidConfiguration { mappers: 1, .. })
    ));
}

#[test]
fn call_guarded_turns_panics_into_errors() -> Result<()> {
    assert_eq!(call_guarded(|| Ok(7))?, 7);

    let err = call_guarded::<()>(|| Err(anyhow!("plain failure"))).unwrap_err();
    assert_eq!(err.to_string(), "plain failure");

    let err = call_guarded::<()>(|| panic!("exploded at {}", 42)).unwrap_err();
    assert_eq!(err.to_string(), "panicked: exploded at 42");
    Ok(())
}
