use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse type tag inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Temporal,
    Other,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Temporal => "temporal",
            ColumnType::Other => "other",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column payload. Missing cells are `None`.
///
/// Temporal values are epoch-based integers in whatever unit the loader
/// produced; only their relative ordering and spread matter downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
    Temporal(Vec<Option<i64>>),
    Other(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValues::Numeric(_) => ColumnType::Numeric,
            ColumnValues::Categorical(_) => ColumnType::Categorical,
            ColumnValues::Temporal(_) => ColumnType::Temporal,
            ColumnValues::Other(_) => ColumnType::Other,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(values) => values.len(),
            ColumnValues::Categorical(values) | ColumnValues::Other(values) => values.len(),
            ColumnValues::Temporal(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Numeric column without missing cells.
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            ColumnValues::Numeric(values.into_iter().map(Some).collect()),
        )
    }

    /// Categorical column without missing cells.
    pub fn categorical<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            ColumnValues::Categorical(values.into_iter().map(|value| Some(value.into())).collect()),
        )
    }

    pub fn column_type(&self) -> ColumnType {
        self.values.column_type()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Present numeric cells, or `None` for non-numeric columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match &self.values {
            ColumnValues::Numeric(values) => Some(
                values
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|value| value.is_finite())
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Summary over present numeric cells. `None` when the column is not
    /// numeric or holds no usable value.
    pub fn stats(&self) -> Option<ColumnStats> {
        ColumnStats::from_values(&self.numeric_values()?)
    }

    /// Arithmetic mean over present numeric cells.
    pub fn mean(&self) -> Option<f64> {
        self.stats().map(|stats| stats.mean)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
}

impl ColumnStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        mean.is_finite().then_some(Self {
            count: values.len(),
            mean,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_skips_missing_cells() {
        let column = Column::new(
            "amount",
            ColumnValues::Numeric(vec![Some(10.0), None, Some(20.0)]),
        );
        let stats = column.stats().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 15.0);
    }

    #[test]
    fn test_non_numeric_has_no_stats() {
        let column = Column::categorical("ward", ["a", "b"]);
        assert_eq!(column.column_type(), ColumnType::Categorical);
        assert!(column.stats().is_none());
        assert!(column.mean().is_none());
    }

    #[test]
    fn test_all_missing_has_no_mean() {
        let column = Column::new("bmi", ColumnValues::Numeric(vec![None, None]));
        assert!(column.mean().is_none());
    }
}
