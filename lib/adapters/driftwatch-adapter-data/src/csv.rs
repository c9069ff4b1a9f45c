use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use driftwatch_domain::{DataBatch, ReferenceDataset};
use driftwatch_ports::{BatchSourcePort, ReferenceLoaderPort};

use crate::frame::frame_to_batch;

/// Reads a headered CSV file, parsing date-like strings as temporal
/// columns.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|options| options.with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("failed to read CSV at {}", path.display()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReferenceLoader;

impl ReferenceLoaderPort for CsvReferenceLoader {
    fn load_reference(&self, source: &Path) -> Result<ReferenceDataset> {
        let frame = read_csv(source)?;
        info!(
            "Reference data loaded from {}: ({}, {})",
            source.display(),
            frame.height(),
            frame.width()
        );
        Ok(ReferenceDataset::new(frame_to_batch(&frame)?))
    }
}

/// Re-reads a CSV file on every fetch. Upstream writers replace the file
/// with the latest production window.
#[derive(Debug, Clone)]
pub struct CsvBatchSource {
    path: PathBuf,
    sample_rows: Option<usize>,
}

impl CsvBatchSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sample_rows: None,
        }
    }

    /// Keep only the last `rows` rows of each fetched batch.
    pub fn with_sample_rows(mut self, rows: Option<usize>) -> Self {
        self.sample_rows = rows;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BatchSourcePort for CsvBatchSource {
    fn fetch_current_batch(&self) -> Result<DataBatch> {
        let mut frame = read_csv(&self.path)?;
        if let Some(rows) = self.sample_rows {
            frame = frame.tail(Some(rows));
        }
        debug!(
            "Fetched batch from {}: ({}, {})",
            self.path.display(),
            frame.height(),
            frame.width()
        );
        frame_to_batch(&frame)
    }
}
