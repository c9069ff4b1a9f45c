use driftwatch_domain::{Alert, DriftResult, Severity};
use tracing::warn;

/// Turns a detected drift into an alert. Compliance failures and late data
/// are exported as metrics only and never alert.
#[derive(Debug, Clone, Copy)]
pub struct AlertEvaluator {
    severity: Severity,
}

impl AlertEvaluator {
    pub fn new(severity: Severity) -> Self {
        Self { severity }
    }

    pub fn evaluate(&self, drift: &DriftResult) -> Option<Alert> {
        if !drift.detected {
            return None;
        }
        warn!("Data drift detected! Score: {:.3}", drift.score);
        Some(Alert::new(
            format!("Data drift detected (score={:.2})", drift.score),
            self.severity,
        ))
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(Severity::Warning)
    }
}
