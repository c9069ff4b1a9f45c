use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{error, warn};

use driftwatch_domain::{Alert, NotificationChannelConfig, NotificationsConfig, Severity};
use driftwatch_ports::AlertSinkPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSinkPort for LogAlertSink {
    fn dispatch(&self, alert: &Alert) -> Result<()> {
        match alert.severity {
            Severity::Critical => error!("ALERT: {}", alert.message),
            _ => warn!("ALERT: {}", alert.message),
        }
        Ok(())
    }
}

/// Publishes alerts to an ntfy topic.
#[derive(Debug, Clone)]
pub struct NtfyAlertSink {
    client: Client,
    url: String,
}

impl NtfyAlertSink {
    pub fn new(url: &str, topic: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build ntfy client")?;
        Ok(Self {
            client,
            url: format!("{}/{}", url.trim_end_matches('/'), topic),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AlertSinkPort for NtfyAlertSink {
    fn dispatch(&self, alert: &Alert) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .header("Title", "Data drift")
            .header("Priority", priority(alert.severity))
            .header("Tags", alert.severity.to_string())
            .body(alert.message.clone())
            .send()
            .with_context(|| format!("failed to reach ntfy at {}", self.url))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("ntfy rejected alert with status {status}");
        }
        Ok(())
    }
}

fn priority(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "default",
        Severity::Warning => "high",
        Severity::Critical => "urgent",
    }
}

/// Delivers every alert to all configured channels.
#[derive(Clone, Default)]
pub struct FanoutAlertSink {
    sinks: Vec<Arc<dyn AlertSinkPort>>,
}

impl FanoutAlertSink {
    pub fn new(sinks: Vec<Arc<dyn AlertSinkPort>>) -> Self {
        Self { sinks }
    }

    pub fn from_config(config: &NotificationsConfig, timeout: Duration) -> Result<Self> {
        let mut sinks: Vec<Arc<dyn AlertSinkPort>> = Vec::with_capacity(config.channels.len());
        for channel in &config.channels {
            match channel {
                NotificationChannelConfig::Log => sinks.push(Arc::new(LogAlertSink)),
                NotificationChannelConfig::Ntfy { url, topic } => {
                    sinks.push(Arc::new(NtfyAlertSink::new(url, topic, timeout)?));
                }
            }
        }
        Ok(Self { sinks })
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AlertSinkPort for FanoutAlertSink {
    /// Attempts every channel, then reports the first failure.
    fn dispatch(&self, alert: &Alert) -> Result<()> {
        let mut first_failure = None;
        for sink in &self.sinks {
            if let Err(err) = sink.dispatch(alert) {
                warn!("Alert channel failed: {err:#}");
                first_failure.get_or_insert(err);
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
