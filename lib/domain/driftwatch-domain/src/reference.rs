use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::batch::DataBatch;
use crate::column::{ColumnStats, ColumnType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub column_type: ColumnType,
}

/// Reference distribution plus its schema fingerprint.
///
/// The fingerprint (column types, numeric column list, per-column stats) is
/// derived once on construction. The value is never mutated afterwards; a
/// new reference means a new `ReferenceDataset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataset {
    data: DataBatch,
    schema: Vec<SchemaField>,
    numeric_columns: Vec<String>,
    stats: BTreeMap<String, ColumnStats>,
}

impl ReferenceDataset {
    pub fn new(data: DataBatch) -> Self {
        let mut schema = Vec::with_capacity(data.column_count());
        let mut numeric_columns = Vec::new();
        let mut stats = BTreeMap::new();

        for column in data.columns() {
            if schema.iter().any(|field: &SchemaField| field.name == column.name) {
                continue;
            }
            let column_type = column.column_type();
            schema.push(SchemaField {
                name: column.name.clone(),
                column_type,
            });
            if column_type == ColumnType::Numeric {
                numeric_columns.push(column.name.clone());
                if let Some(summary) = column.stats() {
                    stats.insert(column.name.clone(), summary);
                }
            }
        }

        Self {
            data,
            schema,
            numeric_columns,
            stats,
        }
    }

    pub fn data(&self) -> &DataBatch {
        &self.data
    }

    pub fn schema(&self) -> &[SchemaField] {
        &self.schema
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.schema
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.column_type)
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn stats(&self, column: &str) -> Option<&ColumnStats> {
        self.stats.get(column)
    }

    pub fn row_count(&self) -> usize {
        self.data.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }
}

impl From<DataBatch> for ReferenceDataset {
    fn from(data: DataBatch) -> Self {
        Self::new(data)
    }
}
