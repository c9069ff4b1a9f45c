use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::alert::Severity;

/// Score above which drift counts as detected.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftwatchConfig {
    pub reference: ReferenceConfig,
    pub batch: BatchConfig,
    pub drift: DriftConfig,
    pub late_data: LateDataConfig,
    pub counters: CountersConfig,
    pub metrics: MetricsConfig,
    pub notifications: NotificationsConfig,
    pub schedule: ScheduleConfig,
    pub io: IoConfig,
}

impl DriftwatchConfig {
    /// Reads YAML from `path`. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.drift.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("drift.threshold must be within [0, 1], got {threshold}");
        }
        if self.drift.bins == 0 {
            anyhow::bail!("drift.bins must be at least 1");
        }
        if self.schedule.interval_secs == 0 {
            anyhow::bail!("schedule.interval_secs must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub path: Option<PathBuf>,
    /// Keep only the most recent rows of each fetched batch.
    pub sample_rows: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftBackend {
    /// Statistical backend when it reports available, mean-shift otherwise.
    #[default]
    Auto,
    Statistical,
    MeanShift,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub threshold: f64,
    pub backend: DriftBackend,
    pub bins: usize,
    /// Severity attached to drift alerts.
    pub alert_severity: Severity,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRIFT_THRESHOLD,
            backend: DriftBackend::Auto,
            bins: 10,
            alert_severity: Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LateDataConfig {
    pub late_counter: String,
    pub total_counter: String,
}

impl Default for LateDataConfig {
    fn default() -> Self {
        Self {
            late_counter: "late_data_count".into(),
            total_counter: "total_data_count".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountersConfig {
    pub redis_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub pushgateway_url: Option<String>,
    pub job: String,
    pub labels: BTreeMap<String, String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            pushgateway_url: Some("http://pushgateway:9091".into()),
            job: "data_drift".into(),
            labels: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationChannelConfig {
    Log,
    Ntfy { url: String, topic: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub channels: Vec<NotificationChannelConfig>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            channels: vec![NotificationChannelConfig::Log],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Upper bound for every blocking external call.
    pub timeout_secs: u64,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl IoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
