//! Core data structures and types for catalog processing.
//!
//! Defines the derived duration unit, the per-run timestamps, and the
//! statistics reported after a run.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Unit classified from the free-text `duration` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationUnit {
    Minutes,
    Seasons,
    Unknown,
}

impl DurationUnit {
    /// Value stored in the `duration_unit` column
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Minutes => "minutes",
            DurationUnit::Seasons => "seasons",
            DurationUnit::Unknown => "unknown",
        }
    }
}

/// Timestamps stamped onto every record of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMetadata {
    pub processing_date: NaiveDate,
    pub processed_timestamp: NaiveDateTime,
}

impl RunMetadata {
    /// Capture the current local time once for the whole run
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(processed_timestamp: NaiveDateTime) -> Self {
        Self {
            processing_date: processed_timestamp.date(),
            processed_timestamp,
        }
    }
}

/// Aggregate counters produced by the cleaning stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub rows_read: usize,
    pub duplicates_dropped: usize,
    pub missing_keys_dropped: usize,
    pub rows_out: usize,
    /// Column -> number of null/empty values replaced by the column default
    pub defaulted_fields: BTreeMap<String, usize>,
    pub ratings_remapped: usize,
    pub dates_defaulted: usize,
    pub release_years_defaulted: usize,
    pub unknown_durations: usize,
}

/// Rows and bytes written for one partition directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSummary {
    pub value: String,
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: u64,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub rows_written: usize,
    pub partitions: Vec<PartitionSummary>,
    pub report: NormalizationReport,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
