use std::sync::Arc;

use anyhow::Result;
use driftwatch_domain::{
    Alert, BackendMetric, BackendReport, Column, DataBatch, DriftBackend, DriftMethod,
    DriftwatchConfig, MonitoringReport, ReferenceDataset, Severity,
};
use driftwatch_ports::{
    AlertSinkPort, InMemoryAlertSink, InMemoryCounterStore, InMemoryMetricsSink, MetricsSinkPort,
    PortSet, StaticBatchSource, StatisticalBackendPort,
};

use crate::engine::MonitoringEngine;

struct UnavailableBackend;

impl StatisticalBackendPort for UnavailableBackend {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn compare(&self, _reference: &DataBatch, _current: &DataBatch) -> Result<BackendReport> {
        Ok(BackendReport {
            metrics: vec![BackendMetric {
                name: "dataset_drift".into(),
                column: None,
                drift_score: Some(0.99),
            }],
        })
    }
}

struct FailingMetrics;

impl MetricsSinkPort for FailingMetrics {
    fn push(&self, _report: &MonitoringReport) -> Result<()> {
        anyhow::bail!("pushgateway unreachable")
    }
}

struct FailingAlerts;

impl AlertSinkPort for FailingAlerts {
    fn dispatch(&self, _alert: &Alert) -> Result<()> {
        anyhow::bail!("ntfy returned 502")
    }
}

fn amount_reference() -> ReferenceDataset {
    ReferenceDataset::new(DataBatch::new(vec![
        Column::numeric("amount", [80.0, 120.0]),
        Column::categorical("ward", ["a", "b"]),
    ]))
}

fn shifted_batch() -> DataBatch {
    DataBatch::new(vec![
        Column::numeric("amount", [140.0, 160.0]),
        Column::categorical("ward", ["a", "a"]),
    ])
}

#[test]
fn test_unavailable_backend_pins_mean_shift() {
    let engine = MonitoringEngine::from_config(
        &DriftwatchConfig::default(),
        PortSet::empty(),
        Some(Arc::new(UnavailableBackend)),
    );
    engine.set_reference(amount_reference());

    assert_eq!(engine.detector_method(), DriftMethod::MeanShift);
    for _ in 0..5 {
        let report = engine.run_cycle(&shifted_batch());
        assert_eq!(report.drift.method, DriftMethod::MeanShift);
        assert_eq!(report.drift.score, 0.5);
    }
}

#[test]
fn test_mean_shift_strategy_ignores_backend() {
    let mut config = DriftwatchConfig::default();
    config.drift.backend = DriftBackend::MeanShift;
    let backend = Arc::new(UnavailableBackend);
    let engine = MonitoringEngine::from_config(&config, PortSet::empty(), Some(backend));
    assert_eq!(engine.detector_method(), DriftMethod::MeanShift);
}

#[test]
fn test_report_is_exported_and_alert_dispatched() {
    let metrics = InMemoryMetricsSink::default();
    let alerts = InMemoryAlertSink::default();
    let ports = PortSet::empty()
        .with_metrics(Arc::new(metrics.clone()))
        .with_alerts(Arc::new(alerts.clone()));
    let engine = MonitoringEngine::from_config(&DriftwatchConfig::default(), ports, None);
    engine.set_reference(amount_reference());

    let report = engine.run_cycle(&shifted_batch());

    assert!(report.drift.detected);
    assert_eq!(metrics.reports(), vec![report.clone()]);
    let dispatched = alerts.alerts();
    assert_eq!(dispatched.len(), 1);
    assert!(dispatched[0].message.contains("0.50"));
}

#[test]
fn test_alert_severity_follows_config() {
    let alerts = InMemoryAlertSink::default();
    let ports = PortSet::empty().with_alerts(Arc::new(alerts.clone()));
    let mut config = DriftwatchConfig::default();
    config.drift.alert_severity = Severity::Critical;
    let engine = MonitoringEngine::from_config(&config, ports, None);
    engine.set_reference(amount_reference());

    engine.run_cycle(&shifted_batch());

    assert_eq!(alerts.alerts()[0].severity, Severity::Critical);
}

#[test]
fn test_transport_failures_do_not_abort_cycle() {
    let ports = PortSet::empty()
        .with_metrics(Arc::new(FailingMetrics))
        .with_alerts(Arc::new(FailingAlerts));
    let engine = MonitoringEngine::from_config(&DriftwatchConfig::default(), ports, None);
    engine.set_reference(amount_reference());

    let report = engine.run_cycle(&shifted_batch());

    assert!(report.drift.detected);
    assert!(report.alert.is_some());
}

#[test]
fn test_schema_failure_does_not_block_drift() {
    let engine =
        MonitoringEngine::from_config(&DriftwatchConfig::default(), PortSet::empty(), None);
    engine.set_reference(amount_reference());

    let batch = DataBatch::new(vec![Column::numeric("amount", [150.0])]);
    let report = engine.run_cycle(&batch);

    assert_eq!(report.compliance.failure_count, 1);
    assert!(report.compliance.missing_columns.contains("ward"));
    assert!(report.drift.detected);
}

#[test]
fn test_late_ratio_comes_from_counters() {
    let counters = InMemoryCounterStore::default();
    counters.set("late_data_count", 3);
    counters.set("total_data_count", 12);
    let ports = PortSet::empty().with_counters(Arc::new(counters));
    let engine = MonitoringEngine::from_config(&DriftwatchConfig::default(), ports, None);

    let report = engine.run_cycle(&shifted_batch());

    assert_eq!(report.late_data_ratio, 0.25);
    assert!(!report.reference_ready);
}

#[test]
fn test_tick_without_source_skips_cycle() {
    let metrics = InMemoryMetricsSink::default();
    let ports = PortSet::empty().with_metrics(Arc::new(metrics.clone()));
    let engine = MonitoringEngine::from_config(&DriftwatchConfig::default(), ports, None);

    assert!(engine.tick().is_none());
    assert!(metrics.reports().is_empty());
}

#[test]
fn test_tick_evaluates_fetched_batch() {
    let ports = PortSet::empty().with_batches(Arc::new(StaticBatchSource::new(shifted_batch())));
    let engine = MonitoringEngine::from_config(&DriftwatchConfig::default(), ports, None);
    engine.set_reference(amount_reference());

    let report = engine.tick().unwrap();
    assert_eq!(report.drift.score, 0.5);
    assert!(report.reference_ready);
}
