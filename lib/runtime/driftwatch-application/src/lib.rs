//! Drift and schema-compliance evaluation engine.

pub mod alerting;
pub mod best_effort;
pub mod compliance;
pub mod drift;
pub mod engine;
pub mod late_data;
pub mod reference_store;

pub use alerting::AlertEvaluator;
pub use compliance::SchemaComplianceChecker;
pub use drift::{DetectError, DriftDetector, MeanShiftDetector, StatisticalDetector, select_detector};
pub use engine::MonitoringEngine;
pub use late_data::{LateDataTracker, late_data_ratio};
pub use reference_store::ReferenceStore;

#[cfg(test)]
mod engine_test;
