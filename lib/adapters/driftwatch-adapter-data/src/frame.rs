use anyhow::{Context, Result};
use polars::prelude::*;

use driftwatch_domain::{Column, ColumnType, ColumnValues, DataBatch};

/// Maps a polars dtype onto the coarse type tags used for schema checks.
pub fn column_type_for(dtype: &DataType) -> ColumnType {
    match dtype {
        dtype if dtype.is_numeric() => ColumnType::Numeric,
        DataType::Boolean | DataType::String => ColumnType::Categorical,
        DataType::Date | DataType::Datetime(_, _) | DataType::Duration(_) | DataType::Time => {
            ColumnType::Temporal
        }
        _ => ColumnType::Other,
    }
}

pub fn frame_to_batch(frame: &DataFrame) -> Result<DataBatch> {
    let columns = frame
        .get_columns()
        .iter()
        .map(series_to_column)
        .collect::<Result<Vec<_>>>()?;
    Ok(DataBatch::new(columns))
}

fn series_to_column(series: &Series) -> Result<Column> {
    let name = series.name().to_string();
    let values = match column_type_for(series.dtype()) {
        ColumnType::Numeric => {
            let cast = series.cast(&DataType::Float64)?;
            ColumnValues::Numeric(cast.f64()?.into_iter().collect())
        }
        ColumnType::Categorical => {
            let cast = series.cast(&DataType::String)?;
            ColumnValues::Categorical(owned_strings(&cast)?)
        }
        ColumnType::Temporal => {
            let cast = series.cast(&DataType::Int64)?;
            ColumnValues::Temporal(cast.i64()?.into_iter().collect())
        }
        ColumnType::Other => {
            let cast = series.cast(&DataType::String)?;
            ColumnValues::Other(owned_strings(&cast)?)
        }
    };
    Ok(Column::new(name, values))
}

fn owned_strings(series: &Series) -> Result<Vec<Option<String>>> {
    let strings = series
        .str()
        .with_context(|| format!("column {} is not string-typed", series.name()))?;
    Ok(strings
        .into_iter()
        .map(|value| value.map(str::to_owned))
        .collect())
}
