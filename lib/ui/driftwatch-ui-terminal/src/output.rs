use std::fmt;

use driftwatch_domain::MonitoringReport;

/// Human-readable summary of one cycle.
pub struct ReportSummary<'a>(pub &'a MonitoringReport);

impl fmt::Display for ReportSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "\nData Drift Results:")?;
        if !report.reference_ready {
            writeln!(f, "  Reference: not set")?;
        }
        writeln!(f, "  Drift Score: {:.3}", report.drift.score)?;
        writeln!(f, "  Drift Detected: {}", report.drift.detected)?;
        writeln!(f, "  Detector: {}", report.drift.method.as_str())?;
        if let Some(error) = &report.drift.error {
            writeln!(f, "  Drift Error: {error}")?;
        }
        writeln!(f, "  Late Data Ratio: {:.3}", report.late_data_ratio)?;
        writeln!(
            f,
            "  Schema Compliance Failures: {}",
            report.compliance.failure_count
        )?;
        if !report.compliance.missing_columns.is_empty() {
            let missing: Vec<&str> = report
                .compliance
                .missing_columns
                .iter()
                .map(String::as_str)
                .collect();
            writeln!(f, "  Missing Columns: {}", missing.join(", "))?;
        }
        for mismatch in &report.compliance.type_mismatches {
            writeln!(
                f,
                "  Type Mismatch: {} ({} vs {})",
                mismatch.column, mismatch.expected, mismatch.actual
            )?;
        }
        if let Some(alert) = &report.alert {
            writeln!(f, "  Alert [{}]: {}", alert.severity, alert.message)?;
        }
        Ok(())
    }
}

pub fn render_report(report: &MonitoringReport) -> String {
    ReportSummary(report).to_string()
}
