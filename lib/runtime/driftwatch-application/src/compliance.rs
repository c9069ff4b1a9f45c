use std::collections::BTreeSet;

use driftwatch_domain::{ComplianceResult, DataBatch, ReferenceDataset, TypeMismatch};
use tracing::warn;

/// Checks that every reference column is present in the batch with the same
/// type tag. Columns only the batch carries are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaComplianceChecker;

impl SchemaComplianceChecker {
    pub fn check(&self, reference: &ReferenceDataset, batch: &DataBatch) -> ComplianceResult {
        let mut missing = BTreeSet::new();
        let mut mismatches = Vec::new();

        for field in reference.schema() {
            match batch.column_type(&field.name) {
                None => {
                    missing.insert(field.name.clone());
                }
                Some(actual) if actual != field.column_type => mismatches.push(TypeMismatch {
                    column: field.name.clone(),
                    expected: field.column_type,
                    actual,
                }),
                Some(_) => {}
            }
        }

        if !missing.is_empty() {
            warn!("Missing columns: {:?}", missing);
        }
        for mismatch in &mismatches {
            warn!(
                "Type mismatch for {}: {} vs {}",
                mismatch.column, mismatch.expected, mismatch.actual
            );
        }

        ComplianceResult::new(missing, mismatches)
    }
}
