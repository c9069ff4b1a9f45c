use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use prometheus::{Encoder, Gauge, Opts, Registry, TextEncoder};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use driftwatch_domain::{MetricsConfig, MonitoringReport};
use driftwatch_ports::MetricsSinkPort;

/// Pushes one gauge set per report to a Prometheus pushgateway, replacing
/// the previous group for the job.
#[derive(Debug, Clone)]
pub struct PushgatewaySink {
    client: Client,
    endpoint: String,
    labels: HashMap<String, String>,
}

impl PushgatewaySink {
    pub fn new(
        gateway: &str,
        job: &str,
        labels: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let labels: HashMap<String, String> = labels
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Gauge::with_opts(Opts::new("data_drift_score", "label check").const_labels(labels.clone()))
            .context("invalid metrics.labels")?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build pushgateway client")?;
        Ok(Self {
            client,
            endpoint: endpoint(gateway, job),
            labels,
        })
    }

    /// `None` when no gateway URL is configured.
    pub fn from_config(config: &MetricsConfig, timeout: Duration) -> Result<Option<Self>> {
        config
            .pushgateway_url
            .as_deref()
            .map(|gateway| Self::new(gateway, &config.job, &config.labels, timeout))
            .transpose()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MetricsSinkPort for PushgatewaySink {
    fn push(&self, report: &MonitoringReport) -> Result<()> {
        let body = encode_report(report, &self.labels)?;
        let response = self
            .client
            .put(&self.endpoint)
            .header(CONTENT_TYPE, TextEncoder::new().format_type())
            .body(body)
            .send()
            .with_context(|| format!("failed to reach pushgateway at {}", self.endpoint))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("pushgateway rejected metrics with status {status}");
        }
        debug!(
            "Pushed drift metrics: score={:.3}, detected={}",
            report.drift.score, report.drift.detected
        );
        Ok(())
    }
}

/// Renders the report gauges in the Prometheus text exposition format.
pub fn encode_report(
    report: &MonitoringReport,
    labels: &HashMap<String, String>,
) -> Result<Vec<u8>> {
    let registry = Registry::new();
    let gauges = [
        ("data_drift_score", "Data drift score (0-1)", report.drift.score),
        (
            "data_drift_detected",
            "Data drift detected (1=yes, 0=no)",
            if report.drift.detected { 1.0 } else { 0.0 },
        ),
        (
            "schema_compliance_failures_total",
            "Total schema compliance failures",
            report.compliance.failure_count as f64,
        ),
        (
            "late_data_ratio",
            "Ratio of late-arriving data",
            report.late_data_ratio,
        ),
    ];
    for (name, help, value) in gauges {
        let gauge = Gauge::with_opts(Opts::new(name, help).const_labels(labels.clone()))?;
        gauge.set(value);
        registry.register(Box::new(gauge))?;
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}

fn endpoint(gateway: &str, job: &str) -> String {
    let trimmed = gateway.trim().trim_end_matches('/');
    let base = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    format!("{base}/metrics/job/{job}")
}
