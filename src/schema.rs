//! Output schema management.
//!
//! The column order and types of the cleaned dataset are fixed; downstream
//! readers depend on them. The normalized frame is projected onto this
//! schema and checked before anything is written.

use crate::constants::*;
use crate::error::{CatalogError, Result};
use polars::prelude::*;
use tracing::debug;

/// The fixed schema of the cleaned catalog
#[derive(Clone, Debug)]
pub struct OutputSchema {
    fields: Vec<(&'static str, DataType)>,
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSchema {
    pub fn new() -> Self {
        let timestamp = DataType::Datetime(TimeUnit::Microseconds, None);
        Self {
            fields: vec![
                (SHOW_ID, DataType::String),
                (TITLE, DataType::String),
                (CONTENT_TYPE, DataType::String),
                (DIRECTOR, DataType::String),
                (CAST_AND_CREW, DataType::String),
                (COUNTRY, DataType::String),
                (DATE_ADDED, DataType::Date),
                (RELEASE_YEAR, DataType::Int32),
                (RATING, DataType::String),
                (DURATION, DataType::String),
                (DURATION_VALUE, DataType::Int32),
                (DURATION_UNIT, DataType::String),
                (GENRE, DataType::String),
                (DESCRIPTION, DataType::String),
                (DESCRIPTION_LENGTH, DataType::Int32),
                (PROCESSING_DATE, DataType::Date),
                (PROCESSED_TIMESTAMP, timestamp),
            ],
        }
    }

    /// Column names in output order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    /// Expected type of a column
    pub fn dtype(&self, column: &str) -> Option<&DataType> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, dtype)| dtype)
    }

    /// Polars schema of the full logical record
    pub fn to_polars_schema(&self) -> Schema {
        Schema::from_iter(
            self.fields
                .iter()
                .map(|(name, dtype)| Field::new((*name).into(), dtype.clone())),
        )
    }

    /// Polars schema of the files inside one partition directory
    pub fn partition_file_schema(&self) -> Schema {
        Schema::from_iter(
            self.fields
                .iter()
                .filter(|(name, _)| *name != PARTITION_COLUMN)
                .map(|(name, dtype)| Field::new((*name).into(), dtype.clone())),
        )
    }

    /// Project `df` onto the output columns, in order, and verify types
    pub fn conform(&self, df: &DataFrame) -> Result<DataFrame> {
        let projected = df.select(self.column_names())?;

        for (name, expected) in &self.fields {
            let found = projected.column(name)?.dtype();
            if found != expected {
                return Err(CatalogError::SchemaMismatch {
                    column: name.to_string(),
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }

        debug!(
            "Conformed frame to output schema: {} columns, {} rows",
            projected.width(),
            projected.height()
        );
        Ok(projected)
    }
}
