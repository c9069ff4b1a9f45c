use serde::{Deserialize, Serialize};

/// Which strategy produced a drift score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftMethod {
    Statistical,
    MeanShift,
    /// No reference was installed when the cycle ran.
    NotReady,
}

impl DriftMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftMethod::Statistical => "statistical",
            DriftMethod::MeanShift => "mean_shift",
            DriftMethod::NotReady => "not_ready",
        }
    }
}

/// Outcome of one drift evaluation.
///
/// `detected` is `score > threshold`, strictly. Construct through
/// [`DriftResult::scored`] so that holds for every detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftResult {
    pub score: f64,
    pub detected: bool,
    pub method: DriftMethod,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DriftResult {
    pub fn scored(score: f64, threshold: f64, method: DriftMethod) -> Self {
        Self {
            score,
            detected: score > threshold,
            method,
            timestamp: crate::now_millis(),
            error: None,
        }
    }

    pub fn not_ready() -> Self {
        Self {
            score: 0.0,
            detected: false,
            method: DriftMethod::NotReady,
            timestamp: crate::now_millis(),
            error: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// One metric reported by a statistical backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendMetric {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default)]
    pub drift_score: Option<f64>,
}

/// Result structure returned by a statistical backend. The first metric is
/// the dataset-level one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendReport {
    pub metrics: Vec<BackendMetric>,
}

impl BackendReport {
    pub fn first_score(&self) -> Option<f64> {
        self.metrics.first().and_then(|metric| metric.drift_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert!(!DriftResult::scored(0.2, 0.2, DriftMethod::MeanShift).detected);
        assert!(DriftResult::scored(0.2000001, 0.2, DriftMethod::MeanShift).detected);
        assert!(!DriftResult::scored(0.0, 0.2, DriftMethod::Statistical).detected);
    }

    #[test]
    fn test_first_score_reads_first_metric_only() {
        let report = BackendReport {
            metrics: vec![
                BackendMetric {
                    name: "dataset_drift".into(),
                    column: None,
                    drift_score: None,
                },
                BackendMetric {
                    name: "column_drift".into(),
                    column: Some("age".into()),
                    drift_score: Some(0.9),
                },
            ],
        };
        assert_eq!(report.first_score(), None);
        assert_eq!(BackendReport::default().first_score(), None);
    }
}
