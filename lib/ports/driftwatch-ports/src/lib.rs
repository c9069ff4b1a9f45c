//! Boundary traits between the evaluation engine and the outside world.
//!
//! Every port is synchronous; adapters doing network I/O bound their calls
//! with a timeout and callers run cycles off the async executor.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use driftwatch_domain::{Alert, BackendReport, DataBatch, MonitoringReport, ReferenceDataset};

pub trait ReferenceLoaderPort: Send + Sync {
    fn load_reference(&self, source: &Path) -> Result<ReferenceDataset>;
}

pub trait BatchSourcePort: Send + Sync {
    fn fetch_current_batch(&self) -> Result<DataBatch>;
}

pub trait CounterStorePort: Send + Sync {
    /// `Ok(None)` when the counter has never been written.
    fn get(&self, name: &str) -> Result<Option<i64>>;
}

pub trait MetricsSinkPort: Send + Sync {
    fn push(&self, report: &MonitoringReport) -> Result<()>;
}

pub trait AlertSinkPort: Send + Sync {
    fn dispatch(&self, alert: &Alert) -> Result<()>;
}

/// Distribution comparison capability. Probed once through
/// [`StatisticalBackendPort::is_available`] when the engine is built.
pub trait StatisticalBackendPort: Send + Sync {
    fn name(&self) -> &str;
    fn is_available(&self) -> bool;
    fn compare(&self, reference: &DataBatch, current: &DataBatch) -> Result<BackendReport>;
}

#[derive(Clone)]
pub struct PortSet {
    pub batches: Arc<dyn BatchSourcePort>,
    pub counters: Arc<dyn CounterStorePort>,
    pub metrics: Arc<dyn MetricsSinkPort>,
    pub alerts: Arc<dyn AlertSinkPort>,
}

impl PortSet {
    pub fn empty() -> Self {
        Self {
            batches: Arc::new(NullBatchSource),
            counters: Arc::new(NullCounterStore),
            metrics: Arc::new(NullMetricsSink),
            alerts: Arc::new(NullAlertSink),
        }
    }

    pub fn with_batches(mut self, batches: Arc<dyn BatchSourcePort>) -> Self {
        self.batches = batches;
        self
    }

    pub fn with_counters(mut self, counters: Arc<dyn CounterStorePort>) -> Self {
        self.counters = counters;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSinkPort>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_alerts(mut self, alerts: Arc<dyn AlertSinkPort>) -> Self {
        self.alerts = alerts;
        self
    }
}

impl Default for PortSet {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Clone, Default)]
struct NullBatchSource;

impl BatchSourcePort for NullBatchSource {
    fn fetch_current_batch(&self) -> Result<DataBatch> {
        anyhow::bail!("no batch source configured")
    }
}

#[derive(Clone, Default)]
struct NullCounterStore;

impl CounterStorePort for NullCounterStore {
    fn get(&self, _name: &str) -> Result<Option<i64>> {
        Ok(None)
    }
}

#[derive(Clone, Default)]
struct NullMetricsSink;

impl MetricsSinkPort for NullMetricsSink {
    fn push(&self, _report: &MonitoringReport) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone, Default)]
struct NullAlertSink;

impl AlertSinkPort for NullAlertSink {
    fn dispatch(&self, _alert: &Alert) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCounterStore {
    counters: Arc<Mutex<HashMap<String, i64>>>,
}

impl InMemoryCounterStore {
    pub fn set(&self, name: &str, value: i64) {
        if let Ok(mut guard) = self.counters.lock() {
            guard.insert(name.to_string(), value);
        }
    }
}

impl CounterStorePort for InMemoryCounterStore {
    fn get(&self, name: &str) -> Result<Option<i64>> {
        let guard = self
            .counters
            .lock()
            .map_err(|_| anyhow::anyhow!("counter store lock poisoned"))?;
        Ok(guard.get(name).copied())
    }
}

/// Batch source replaying a fixed batch, for dry runs and tests.
#[derive(Clone, Default)]
pub struct StaticBatchSource {
    batch: DataBatch,
}

impl StaticBatchSource {
    pub fn new(batch: DataBatch) -> Self {
        Self { batch }
    }
}

impl BatchSourcePort for StaticBatchSource {
    fn fetch_current_batch(&self) -> Result<DataBatch> {
        Ok(self.batch.clone())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryMetricsSink {
    reports: Arc<Mutex<Vec<MonitoringReport>>>,
}

impl InMemoryMetricsSink {
    pub fn reports(&self) -> Vec<MonitoringReport> {
        self.reports
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl MetricsSinkPort for InMemoryMetricsSink {
    fn push(&self, report: &MonitoringReport) -> Result<()> {
        let mut guard = self
            .reports
            .lock()
            .map_err(|_| anyhow::anyhow!("metrics sink lock poisoned"))?;
        guard.push(report.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAlertSink {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl InMemoryAlertSink {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl AlertSinkPort for InMemoryAlertSink {
    fn dispatch(&self, alert: &Alert) -> Result<()> {
        let mut guard = self
            .alerts
            .lock()
            .map_err(|_| anyhow::anyhow!("alert sink lock poisoned"))?;
        guard.push(alert.clone());
        Ok(())
    }
}
