//! Raw catalog loading.
//!
//! Reads the source CSV in full with every column as String, so that the
//! cleaning stages see the original text of each field.

use crate::constants::REQUIRED_SOURCE_COLUMNS;
use crate::error::{CatalogError, Result};

use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Read the raw catalog and keep only the known source columns
pub fn read_catalog_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(CatalogError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            reason: format!("Failed to parse CSV: {}", e),
        })?;

    for column in REQUIRED_SOURCE_COLUMNS {
        if df.column(column).is_err() {
            return Err(CatalogError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let extra = df.width().saturating_sub(REQUIRED_SOURCE_COLUMNS.len());
    if extra > 0 {
        debug!("Ignoring {} extra source columns", extra);
    }

    let df = df.select(REQUIRED_SOURCE_COLUMNS.iter().copied())?;
    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}
