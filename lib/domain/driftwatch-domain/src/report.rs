use serde::{Deserialize, Serialize};

use crate::alert::Alert;
use crate::compliance::ComplianceResult;
use crate::drift::DriftResult;

/// Everything one monitoring cycle produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringReport {
    pub drift: DriftResult,
    pub compliance: ComplianceResult,
    pub late_data_ratio: f64,
    pub reference_ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
    pub timestamp: i64,
}
