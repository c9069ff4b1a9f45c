use std::sync::Arc;

use driftwatch_domain::{
    ComplianceResult, DataBatch, DriftMethod, DriftResult, DriftwatchConfig, MonitoringReport,
    ReferenceDataset, now_millis,
};
use driftwatch_ports::{PortSet, StatisticalBackendPort};
use tracing::{debug, info, warn};

use crate::alerting::AlertEvaluator;
use crate::best_effort::attempt;
use crate::compliance::SchemaComplianceChecker;
use crate::drift::{DriftDetector, select_detector};
use crate::late_data::LateDataTracker;
use crate::reference_store::ReferenceStore;

/// Runs monitoring cycles against the installed reference.
///
/// One cycle: schema check, drift scoring, late-data ratio, alert
/// evaluation, then best-effort export. Every step runs regardless of the
/// others and nothing escapes [`MonitoringEngine::run_cycle`].
pub struct MonitoringEngine {
    store: Arc<ReferenceStore>,
    checker: SchemaComplianceChecker,
    detector: Arc<dyn DriftDetector>,
    late_data: LateDataTracker,
    alerts: AlertEvaluator,
    ports: PortSet,
}

impl MonitoringEngine {
    pub fn new(
        detector: Arc<dyn DriftDetector>,
        late_data: LateDataTracker,
        ports: PortSet,
    ) -> Self {
        Self {
            store: Arc::new(ReferenceStore::new()),
            checker: SchemaComplianceChecker,
            detector,
            late_data,
            alerts: AlertEvaluator::default(),
            ports,
        }
    }

    /// Builds the engine, probing `backend` once to pick the detector.
    pub fn from_config(
        config: &DriftwatchConfig,
        ports: PortSet,
        backend: Option<Arc<dyn StatisticalBackendPort>>,
    ) -> Self {
        let detector = select_detector(config.drift.backend, config.drift.threshold, backend);
        Self::new(detector, LateDataTracker::from_config(&config.late_data), ports)
            .with_alert_evaluator(AlertEvaluator::new(config.drift.alert_severity))
    }

    pub fn with_alert_evaluator(mut self, alerts: AlertEvaluator) -> Self {
        self.alerts = alerts;
        self
    }

    pub fn with_reference_store(mut self, store: Arc<ReferenceStore>) -> Self {
        self.store = store;
        self
    }

    pub fn reference_store(&self) -> &Arc<ReferenceStore> {
        &self.store
    }

    pub fn set_reference(&self, dataset: ReferenceDataset) {
        self.store.set_reference(dataset);
    }

    pub fn detector_method(&self) -> DriftMethod {
        self.detector.method()
    }

    pub fn threshold(&self) -> f64 {
        self.detector.threshold()
    }

    pub fn run_cycle(&self, batch: &DataBatch) -> MonitoringReport {
        let reference = self.store.get_reference();

        let (compliance, drift) = match reference.as_deref() {
            Some(reference) => (
                self.checker.check(reference, batch),
                self.detector.detect(reference, batch),
            ),
            None => {
                warn!("Reference data not set. Skipping drift detection.");
                (ComplianceResult::default(), DriftResult::not_ready())
            }
        };

        let late_data_ratio = self.late_data.measure(self.ports.counters.as_ref());
        let alert = self.alerts.evaluate(&drift);

        let report = MonitoringReport {
            drift,
            compliance,
            late_data_ratio,
            reference_ready: reference.is_some(),
            alert,
            timestamp: now_millis(),
        };

        attempt("push metrics to Prometheus", || self.ports.metrics.push(&report));
        if let Some(alert) = &report.alert {
            attempt("dispatch drift alert", || self.ports.alerts.dispatch(alert));
        }

        debug!(
            "Cycle complete: score={:.3}, detected={}, late_ratio={:.3}, schema_failures={}",
            report.drift.score,
            report.drift.detected,
            report.late_data_ratio,
            report.compliance.failure_count
        );
        report
    }

    /// Fetches a batch from the configured source and runs one cycle. A
    /// failed fetch skips the cycle.
    pub fn tick(&self) -> Option<MonitoringReport> {
        let batch = attempt("fetch current batch", || {
            self.ports.batches.fetch_current_batch()
        })?;
        info!(
            "Evaluating batch: {} rows x {} columns",
            batch.row_count(),
            batch.column_count()
        );
        Some(self.run_cycle(&batch))
    }
}
