use std::sync::Arc;
use std::time::Duration;

use driftwatch::application::MonitoringEngine;
use driftwatch::domain::{
    Column, DataBatch, DriftBackend, DriftMethod, DriftwatchConfig, ReferenceDataset,
};
use driftwatch::ports::{
    InMemoryAlertSink, InMemoryCounterStore, InMemoryMetricsSink, PortSet, StaticBatchSource,
};
use driftwatch::stats::DistributionDriftBackend;
use driftwatch::terminal::service::run_ticks;

struct Harness {
    engine: MonitoringEngine,
    metrics: InMemoryMetricsSink,
    alerts: InMemoryAlertSink,
    counters: InMemoryCounterStore,
}

fn harness(backend: DriftBackend) -> Harness {
    let mut config = DriftwatchConfig::default();
    config.drift.backend = backend;

    let metrics = InMemoryMetricsSink::default();
    let alerts = InMemoryAlertSink::default();
    let counters = InMemoryCounterStore::default();
    let ports = PortSet::empty()
        .with_metrics(Arc::new(metrics.clone()))
        .with_alerts(Arc::new(alerts.clone()))
        .with_counters(Arc::new(counters.clone()));

    let engine = MonitoringEngine::from_config(
        &config,
        ports,
        Some(Arc::new(DistributionDriftBackend::default())),
    );
    Harness {
        engine,
        metrics,
        alerts,
        counters,
    }
}

#[test]
fn mean_shift_of_half_raises_alert() {
    let h = harness(DriftBackend::MeanShift);
    h.engine.set_reference(ReferenceDataset::new(DataBatch::new(vec![Column::numeric(
        "amount",
        [90.0, 110.0],
    )])));

    let report = h
        .engine
        .run_cycle(&DataBatch::new(vec![Column::numeric("amount", [140.0, 160.0])]));

    assert_eq!(report.drift.score, 0.5);
    assert!(report.drift.detected);
    assert_eq!(report.compliance.failure_count, 0);
    let alerts = h.alerts.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].message.contains("0.50"));
    assert_eq!(h.metrics.reports().len(), 1);
}

#[test]
fn missing_column_is_reported_and_drift_uses_the_rest() {
    let h = harness(DriftBackend::MeanShift);
    h.engine.set_reference(ReferenceDataset::new(DataBatch::new(vec![
        Column::numeric("age", [40.0, 60.0]),
        Column::numeric("bmi", [20.0, 30.0]),
    ])));

    let report = h
        .engine
        .run_cycle(&DataBatch::new(vec![Column::numeric("age", [55.0, 65.0])]));

    assert!(report.compliance.missing_columns.contains("bmi"));
    assert_eq!(report.compliance.failure_count, 1);
    assert_eq!(report.drift.score, 0.2);
    assert!(!report.drift.detected);
    assert!(h.alerts.alerts().is_empty());
}

#[test]
fn cycle_without_reference_is_quiet() {
    let h = harness(DriftBackend::Auto);

    let report = h
        .engine
        .run_cycle(&DataBatch::new(vec![Column::numeric("amount", [1.0])]));

    assert!(!report.reference_ready);
    assert_eq!(report.drift.score, 0.0);
    assert!(!report.drift.detected);
    assert_eq!(report.drift.method, DriftMethod::NotReady);
    assert_eq!(report.compliance.failure_count, 0);
    assert!(h.alerts.alerts().is_empty());
    assert_eq!(h.metrics.reports().len(), 1);
}

#[test]
fn late_ratio_reads_counters() {
    let h = harness(DriftBackend::Auto);
    h.counters.set("late_data_count", 5);
    h.counters.set("total_data_count", 20);

    let report = h.engine.run_cycle(&DataBatch::default());

    assert_eq!(report.late_data_ratio, 0.25);
}

#[test]
fn swapping_reference_changes_the_baseline() {
    let h = harness(DriftBackend::MeanShift);
    let batch = DataBatch::new(vec![Column::numeric("amount", [150.0])]);

    h.engine.set_reference(ReferenceDataset::new(DataBatch::new(vec![Column::numeric(
        "amount",
        [100.0],
    )])));
    assert!(h.engine.run_cycle(&batch).drift.detected);

    h.engine.set_reference(ReferenceDataset::new(DataBatch::new(vec![Column::numeric(
        "amount",
        [150.0],
    )])));
    assert_eq!(h.engine.run_cycle(&batch).drift.score, 0.0);
}

#[tokio::test(start_paused = true)]
async fn scheduled_ticks_export_each_cycle() {
    let metrics = InMemoryMetricsSink::default();
    let batch = DataBatch::new(vec![Column::numeric("amount", [100.0, 120.0])]);
    let ports = PortSet::empty()
        .with_batches(Arc::new(StaticBatchSource::new(batch.clone())))
        .with_metrics(Arc::new(metrics.clone()));

    let mut config = DriftwatchConfig::default();
    config.drift.backend = DriftBackend::MeanShift;
    let engine = MonitoringEngine::from_config(&config, ports, None);
    engine.set_reference(ReferenceDataset::new(batch));

    let completed = run_ticks(Arc::new(engine), Duration::from_secs(60), Some(3)).await;

    assert_eq!(completed, 3);
    assert_eq!(metrics.reports().len(), 3);
    assert!(metrics.reports().iter().all(|report| !report.drift.detected));
}
