//! Domain models and invariants.

pub mod alert;
pub mod batch;
pub mod column;
pub mod compliance;
pub mod config;
pub mod drift;
pub mod reference;
pub mod report;

pub use alert::{Alert, Severity};
pub use batch::DataBatch;
pub use column::{Column, ColumnStats, ColumnType, ColumnValues};
pub use compliance::{ComplianceResult, TypeMismatch};
pub use config::{
    BatchConfig, CountersConfig, DEFAULT_DRIFT_THRESHOLD, DriftBackend, DriftConfig,
    DriftwatchConfig, IoConfig, LateDataConfig, MetricsConfig, NotificationChannelConfig,
    NotificationsConfig, ReferenceConfig, ScheduleConfig,
};
pub use drift::{BackendMetric, BackendReport, DriftMethod, DriftResult};
pub use reference::{ReferenceDataset, SchemaField};
pub use report::MonitoringReport;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
