// tests/metrics.rs
use anyhow::Result;
use ironreduce::jobs::word_count;
use ironreduce::metrics::{CounterMetric, GaugeMetric, Metric, MetricsCollector};
use ironreduce::MapReduce;
use serde_json::{Value, json};

fn three_lines() -> Vec<String> {
    vec![
        "the quick fox".to_string(),
        "the lazy dog".to_string(),
        "the fox jumps".to_string(),
    ]
}

#[test]
fn driver_records_job_counters_and_phase_timings() -> Result<()> {
    let metrics = MetricsCollector::new();
    let mr = MapReduce::new(2, 2)?.with_metrics(metrics.clone());
    word_count::run(&mr, &three_lines())?;

    let snap = metrics.snapshot();
    assert_eq!(snap["input_items"], json!(3));
    assert_eq!(snap["partitions"], json!(2));
    assert_eq!(snap["emitted_pairs"], json!(9));
    assert_eq!(snap["distinct_keys"], json!(6));
    assert_eq!(snap["shards"], json!(2));
    assert_eq!(snap["results"], json!(6));
    for gauge in ["map_phase_ms", "shuffle_phase_ms", "reduce_phase_ms"] {
        assert!(snap[gauge].as_f64().is_some_and(|ms| ms >= 0.0), "{gauge}");
    }
    assert!(metrics.elapsed().is_some());
    Ok(())
}

#[test]
fn counters_accumulate_across_jobs() -> Result<()> {
    let metrics = MetricsCollector::new();
    let mr = MapReduce::new(3, 1)?.with_metrics(metrics.clone());
    word_count::run(&mr, &three_lines())?;
    word_count::run_map_only(&mr, &three_lines())?;

    let snap = metrics.snapshot();
    assert_eq!(snap["input_items"], json!(6));
    assert_eq!(snap["emitted_pairs"], json!(18));
    assert_eq!(snap["results"], json!(6));
    Ok(())
}

#[test]
fn failed_job_records_no_results() -> Result<()> {
    let metrics = MetricsCollector::new();
    let mr = MapReduce::new(2, 2)?.with_metrics(metrics.clone());
    let data = vec![1, 2, 3];
    let result = mr.try_map_reduce(
        &data,
        |_: &i32| -> anyhow::Result<Vec<(i32, i32)>> { anyhow::bail!("nope") },
        |k, vs| Ok((*k, vs.len())),
    );
    assert!(result.is_err());

    let snap = metrics.snapshot();
    assert_eq!(snap["input_items"], json!(3));
    assert!(!snap.contains_key("results"));
    Ok(())
}

#[test]
fn collector_counters_and_gauges() {
    let metrics = MetricsCollector::new();
    metrics.increment_counter("hits", 2);
    metrics.increment_counter("hits", 3);
    metrics.set_counter("fixed", 7);
    metrics.set_gauge("ratio", 0.5);
    metrics.register(Box::new(
        GaugeMetric::new("latency_ms", 12.5).with_description("p50 latency"),
    ));
    metrics.register(Box::new(CounterMetric::with_value("preset", 4)));

    let snap = metrics.snapshot();
    assert_eq!(snap["hits"], json!(5));
    assert_eq!(snap["fixed"], json!(7));
    assert_eq!(snap["ratio"], json!(0.5));
    assert_eq!(snap["preset"], json!(4));

    let out = metrics.to_json();
    assert_eq!(out["latency_ms"]["value"], json!(12.5));
    assert_eq!(out["latency_ms"]["description"], json!("p50 latency"));
    assert!(out.get("execution_time_ms").is_none());

    metrics.record_start();
    metrics.record_end();
    assert!(metrics.to_json().get("execution_time_ms").is_some());
}

#[test]
fn counter_metric_reports_its_value() {
    let c = CounterMetric::new("items");
    assert_eq!(c.name(), "items");
    assert_eq!(c.value(), json!(0));
    assert!(c.description().is_none());
}

#[test]
fn metrics_save_to_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metrics.json");

    let metrics = MetricsCollector::new();
    metrics.increment_counter("input_items", 42);
    metrics.save_to_file(&path)?;

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved["input_items"]["value"], json!(42));
    Ok(())
}
