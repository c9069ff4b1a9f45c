//! Tabular data adapters backed by polars.

pub mod csv;
pub mod frame;

pub use csv::{CsvBatchSource, CsvReferenceLoader, read_csv};
pub use frame::{column_type_for, frame_to_batch};

#[cfg(test)]
mod csv_test;
