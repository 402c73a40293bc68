//! Catalog Processor Library
//!
//! A Rust library for turning a raw streaming-catalog CSV export into a
//! cleaned, typed Parquet dataset partitioned by content type.
//!
//! This library provides tools for:
//! - Reading the raw catalog with every field kept as its original text
//! - Deduplicating titles by `show_id` (first occurrence wins)
//! - Defaulting missing free text, sanitizing ratings against an allow-list
//! - Parsing `date_added` and `release_year` with sentinel fallbacks
//! - Splitting `duration` into a value and a unit
//! - Writing hive-partitioned Parquet files with Snappy compression

pub mod cleaning;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod schema;

// Re-export commonly used types
pub use config::ProcessorConfig;
pub use error::{CatalogError, Result};
pub use models::{NormalizationReport, ProcessingStats, RunMetadata};
pub use processor::CatalogProcessor;
