use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use driftwatch_domain::{DataBatch, DriftMethod, DriftResult, ReferenceDataset};
use driftwatch_ports::StatisticalBackendPort;
use tracing::{debug, warn};

use super::{DetectError, DriftDetector, MeanShiftDetector};

/// Detector delegating to a statistical backend, degrading to mean-shift
/// for any cycle where the backend fails.
pub struct StatisticalDetector {
    backend: Arc<dyn StatisticalBackendPort>,
    fallback: MeanShiftDetector,
    threshold: f64,
    failure_logged: AtomicBool,
}

impl StatisticalDetector {
    pub fn new(backend: Arc<dyn StatisticalBackendPort>, threshold: f64) -> Self {
        Self {
            backend,
            fallback: MeanShiftDetector::new(threshold),
            threshold,
            failure_logged: AtomicBool::new(false),
        }
    }

    fn backend_score(
        &self,
        reference: &ReferenceDataset,
        batch: &DataBatch,
    ) -> Result<f64, DetectError> {
        let report = self
            .backend
            .compare(reference.data(), batch)
            .map_err(|err| DetectError::BackendFailed(format!("{err:#}")))?;
        let score = report.first_score().ok_or(DetectError::EmptyBackendReport)?;
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(DetectError::InvalidScore(score));
        }
        Ok(score)
    }

    fn log_failure(&self, err: &DetectError) {
        if self.failure_logged.swap(true, Ordering::Relaxed) {
            debug!("Error in drift detection: {err}. Using mean-shift for this cycle.");
        } else {
            warn!("Error in drift detection: {err}. Using mean-shift for this cycle.");
        }
    }
}

impl DriftDetector for StatisticalDetector {
    fn method(&self) -> DriftMethod {
        DriftMethod::Statistical
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn detect(&self, reference: &ReferenceDataset, batch: &DataBatch) -> DriftResult {
        match self.backend_score(reference, batch) {
            Ok(score) => {
                debug!("Statistical drift score: {score:.3}");
                DriftResult::scored(score, self.threshold, DriftMethod::Statistical)
            }
            Err(err) => {
                self.log_failure(&err);
                let mut result = self.fallback.detect(reference, batch);
                result.error = Some(err.to_string());
                result
            }
        }
    }
}
