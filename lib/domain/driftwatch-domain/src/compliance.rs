use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::column::ColumnType;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeMismatch {
    pub column: String,
    pub expected: ColumnType,
    pub actual: ColumnType,
}

/// Schema diff of a batch against the reference fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub missing_columns: BTreeSet<String>,
    pub type_mismatches: Vec<TypeMismatch>,
    pub failure_count: usize,
}

impl ComplianceResult {
    pub fn new(missing_columns: BTreeSet<String>, type_mismatches: Vec<TypeMismatch>) -> Self {
        let failure_count = missing_columns.len() + type_mismatches.len();
        Self {
            missing_columns,
            type_mismatches,
            failure_count,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.failure_count == 0
    }
}
