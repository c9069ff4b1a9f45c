use driftwatch_domain::{DataBatch, DriftMethod, DriftResult, ReferenceDataset};
use tracing::debug;

use super::DriftDetector;

/// Fallback detector comparing per-column means.
#[derive(Debug, Clone, Copy)]
pub struct MeanShiftDetector {
    threshold: f64,
}

impl MeanShiftDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl DriftDetector for MeanShiftDetector {
    fn method(&self) -> DriftMethod {
        DriftMethod::MeanShift
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn detect(&self, reference: &ReferenceDataset, batch: &DataBatch) -> DriftResult {
        let score = mean_shift_score(reference, batch);
        debug!("Mean-shift drift score: {score:.3}");
        DriftResult::scored(score, self.threshold, DriftMethod::MeanShift)
    }
}

/// Mean over numeric columns of `|mean_cur - mean_ref| / |mean_ref|`, each
/// capped at 1.0.
///
/// Columns are skipped when the reference mean is zero, when the batch
/// column is absent or non-numeric, or when either side has no usable
/// value. No comparable column yields 0.0.
pub fn mean_shift_score(reference: &ReferenceDataset, batch: &DataBatch) -> f64 {
    let changes: Vec<f64> = reference
        .numeric_columns()
        .iter()
        .filter_map(|name| {
            let reference_mean = reference.stats(name)?.mean;
            if reference_mean == 0.0 {
                return None;
            }
            let current_mean = batch.column(name)?.mean()?;
            let relative_change = (current_mean - reference_mean).abs() / reference_mean.abs();
            Some(relative_change.min(1.0))
        })
        .collect();

    if changes.is_empty() {
        return 0.0;
    }
    changes.iter().sum::<f64>() / changes.len() as f64
}
