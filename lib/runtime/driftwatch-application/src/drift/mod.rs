//! Drift detection strategies.
//!
//! Both detectors share one contract: [`DriftDetector::detect`] always
//! returns a [`DriftResult`], and `detected` is `score > threshold` with the
//! same configured threshold whichever strategy is active.

mod mean_shift;
mod statistical;

use std::sync::Arc;

use driftwatch_domain::{DataBatch, DriftBackend, DriftMethod, DriftResult, ReferenceDataset};
use driftwatch_ports::StatisticalBackendPort;
use thiserror::Error;
use tracing::{info, warn};

pub use mean_shift::{MeanShiftDetector, mean_shift_score};
pub use statistical::StatisticalDetector;

pub trait DriftDetector: Send + Sync {
    fn method(&self) -> DriftMethod;
    fn threshold(&self) -> f64;
    fn detect(&self, reference: &ReferenceDataset, batch: &DataBatch) -> DriftResult;
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("statistical backend failed: {0}")]
    BackendFailed(String),
    #[error("statistical backend reported no drift score")]
    EmptyBackendReport,
    #[error("statistical backend reported invalid drift score {0}")]
    InvalidScore(f64),
}

/// Picks the detector for the lifetime of an engine. The backend is probed
/// here and only here.
pub fn select_detector(
    strategy: DriftBackend,
    threshold: f64,
    backend: Option<Arc<dyn StatisticalBackendPort>>,
) -> Arc<dyn DriftDetector> {
    if strategy == DriftBackend::MeanShift {
        info!("Mean-shift drift detection selected by configuration");
        return Arc::new(MeanShiftDetector::new(threshold));
    }

    match backend {
        Some(backend) if backend.is_available() => {
            info!("Using statistical drift backend: {}", backend.name());
            Arc::new(StatisticalDetector::new(backend, threshold))
        }
        _ => {
            warn!("Statistical backend not available. Using simple drift detection.");
            Arc::new(MeanShiftDetector::new(threshold))
        }
    }
}
