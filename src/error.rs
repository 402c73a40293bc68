//! Error handling for catalog processing operations.
//!
//! Fatal errors only: per-record data-quality problems are resolved by
//! defaulting inside the cleaning stages and never surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Input catalog not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Input catalog {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Read stage failed for file: {path} - {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Write stage failed for output: {path} - {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Output schema mismatch for column '{column}': expected {expected}, found {found}")]
    SchemaMismatch {
        column: String,
        expected: String,
        found: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
