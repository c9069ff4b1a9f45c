//! Distribution-distance drift backend.

pub mod distance;

use std::collections::BTreeSet;

use anyhow::Result;
use driftwatch_domain::{BackendMetric, BackendReport, Column, ColumnValues, DataBatch};
use driftwatch_ports::StatisticalBackendPort;

pub use distance::{categorical_distance, hellinger_distance, histogram, numeric_distance};

pub const DATASET_METRIC: &str = "dataset_drift";
pub const COLUMN_METRIC: &str = "column_drift";

/// Compares column distributions with the Hellinger distance.
///
/// Numeric and temporal columns are binned over the pooled range of both
/// sides; categorical columns are compared on category frequencies. The
/// first reported metric is the mean distance over comparable columns.
#[derive(Debug, Clone, Copy)]
pub struct DistributionDriftBackend {
    bins: usize,
}

impl DistributionDriftBackend {
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    fn column_distance(&self, reference: &Column, current: &Column) -> Option<f64> {
        match (&reference.values, &current.values) {
            (ColumnValues::Numeric(lhs), ColumnValues::Numeric(rhs)) => {
                numeric_distance(&finite(lhs), &finite(rhs), self.bins)
            }
            (ColumnValues::Temporal(lhs), ColumnValues::Temporal(rhs)) => {
                numeric_distance(&as_f64(lhs), &as_f64(rhs), self.bins)
            }
            (ColumnValues::Categorical(lhs), ColumnValues::Categorical(rhs)) => {
                categorical_distance(lhs, rhs)
            }
            _ => None,
        }
    }
}

impl Default for DistributionDriftBackend {
    fn default() -> Self {
        Self::new(10)
    }
}

impl StatisticalBackendPort for DistributionDriftBackend {
    fn name(&self) -> &str {
        "hellinger"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn compare(&self, reference: &DataBatch, current: &DataBatch) -> Result<BackendReport> {
        let mut seen = BTreeSet::new();
        let mut column_metrics = Vec::new();

        for column in reference.columns() {
            if !seen.insert(column.name.as_str()) {
                continue;
            }
            let Some(other) = current.column(&column.name) else {
                continue;
            };
            if let Some(distance) = self.column_distance(column, other) {
                column_metrics.push(BackendMetric {
                    name: COLUMN_METRIC.to_string(),
                    column: Some(column.name.clone()),
                    drift_score: Some(distance),
                });
            }
        }

        let scores: Vec<f64> = column_metrics
            .iter()
            .filter_map(|metric| metric.drift_score)
            .collect();
        let dataset_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        let mut metrics = Vec::with_capacity(column_metrics.len() + 1);
        metrics.push(BackendMetric {
            name: DATASET_METRIC.to_string(),
            column: None,
            drift_score: Some(dataset_score),
        });
        metrics.extend(column_metrics);
        Ok(BackendReport { metrics })
    }
}

fn finite(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|value| value.is_finite())
        .collect()
}

fn as_f64(values: &[Option<i64>]) -> Vec<f64> {
    values.iter().flatten().map(|value| *value as f64).collect()
}
