use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use driftwatch_adapter_data::{CsvBatchSource, CsvReferenceLoader};
use driftwatch_adapter_notification::FanoutAlertSink;
use driftwatch_adapter_telemetry::{PushgatewaySink, RedisCounterStore};
use driftwatch_application::MonitoringEngine;
use driftwatch_domain::{DriftBackend, DriftwatchConfig};
use driftwatch_ports::{PortSet, ReferenceLoaderPort, StatisticalBackendPort};
use driftwatch_stats::DistributionDriftBackend;
use tracing::info;

pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(path) = env::var("DRIFTWATCH_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("HOME") {
        let candidate = Path::new(&home).join(".driftwatch").join("config.yaml");
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from("driftwatch-config.yaml")
}

pub fn load_config(explicit: Option<&Path>) -> Result<DriftwatchConfig> {
    let path = config_path(explicit);
    let config = DriftwatchConfig::load_from_path(&path)?;
    info!("Configuration resolved from {}", path.display());
    Ok(config)
}

/// Statistical backend for the configured strategy. `None` pins the engine
/// to mean-shift.
pub fn statistical_backend(config: &DriftwatchConfig) -> Option<Arc<dyn StatisticalBackendPort>> {
    match config.drift.backend {
        DriftBackend::MeanShift => None,
        DriftBackend::Auto | DriftBackend::Statistical => {
            Some(Arc::new(DistributionDriftBackend::new(config.drift.bins)))
        }
    }
}

pub fn build_ports(config: &DriftwatchConfig) -> Result<PortSet> {
    let timeout = config.io.timeout();
    let mut ports = PortSet::empty();

    if let Some(path) = &config.batch.path {
        ports = ports.with_batches(Arc::new(
            CsvBatchSource::new(path).with_sample_rows(config.batch.sample_rows),
        ));
    }
    if let Some(url) = &config.counters.redis_url {
        ports = ports.with_counters(Arc::new(RedisCounterStore::open(url, timeout)?));
    }
    if let Some(sink) = PushgatewaySink::from_config(&config.metrics, timeout)? {
        info!("Pushing metrics to {}", sink.endpoint());
        ports = ports.with_metrics(Arc::new(sink));
    }
    ports = ports.with_alerts(Arc::new(FanoutAlertSink::from_config(
        &config.notifications,
        timeout,
    )?));
    Ok(ports)
}

/// Builds the engine and installs the reference. Failing to load the
/// reference is fatal.
pub fn build_engine(config: &DriftwatchConfig) -> Result<MonitoringEngine> {
    let reference_path = config
        .reference
        .path
        .as_deref()
        .context("reference.path must be configured")?;

    let engine =
        MonitoringEngine::from_config(config, build_ports(config)?, statistical_backend(config));
    let reference = CsvReferenceLoader
        .load_reference(reference_path)
        .context("failed to load reference data")?;
    engine.set_reference(reference);
    Ok(engine)
}
