//! Partitioned Parquet writing for the cleaned catalog
//!
//! Writes one hive-style directory per `content_type` value
//! (`content_type=Movie/part-00000.parquet`). The partition column is
//! carried by the directory name, not stored in the files. Everything is
//! written to a staging directory first and swapped into place once all
//! partitions succeeded, so the target is either the previous run's output
//! or the complete new one.

use crate::config::ProcessorConfig;
use crate::constants::{NULL_PARTITION_VALUE, PARTITION_COLUMN, PARTITION_FILE_NAME};
use crate::error::{CatalogError, Result};
use crate::models::PartitionSummary;
use crate::schema::OutputSchema;

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::{
    BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, ParquetReader, ParquetWriter as PolarsParquetWriter,
    SerReader, Series, StatisticsOptions,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Parquet writer partitioned by content type
#[derive(Debug, Clone)]
pub struct PartitionedWriter {
    output_path: PathBuf,
    config: ProcessorConfig,
}

impl PartitionedWriter {
    /// Create a new partitioned writer
    pub fn new(output_path: PathBuf, config: ProcessorConfig) -> Self {
        Self {
            output_path,
            config,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the frame on a blocking thread with a spinner
    pub async fn write_partitioned(&self, df: DataFrame) -> Result<Vec<PartitionSummary>> {
        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        progress_bar.set_message(format!(
            "Writing {} rows to {}",
            df.height(),
            self.output_path.display()
        ));
        progress_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        let writer = self.clone();
        let result = tokio::task::spawn_blocking(move || writer.write(&df))
            .await
            .map_err(|e| CatalogError::WriteFailed {
                path: self.output_path.clone(),
                reason: format!("Failed to spawn write task: {}", e),
            })?;

        match &result {
            Ok(partitions) => progress_bar.finish_with_message(format!(
                "Wrote {} partitions to {}",
                partitions.len(),
                self.output_path.display()
            )),
            Err(_) => progress_bar.abandon_with_message("Write failed"),
        }
        result
    }

    /// Replace the target directory with one partition per content type
    pub fn write(&self, df: &DataFrame) -> Result<Vec<PartitionSummary>> {
        let staging = self.staging_path()?;
        if let Some(parent) = staging.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_failed(parent, e))?;
        }
        if staging.exists() {
            warn!("Removing stale staging directory {}", staging.display());
            fs::remove_dir_all(&staging).map_err(|e| self.write_failed(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| self.write_failed(&staging, e))?;

        let partitions = match self.write_partitions(df, &staging) {
            Ok(partitions) => partitions,
            Err(e) => {
                let _ = fs::remove_dir_all(&staging);
                return Err(e);
            }
        };

        self.swap_into_place(&staging)?;
        info!(
            "Wrote {} rows in {} partitions to {}",
            df.height(),
            partitions.len(),
            self.output_path.display()
        );
        Ok(partitions)
    }

    fn write_partitions(&self, df: &DataFrame, staging: &Path) -> Result<Vec<PartitionSummary>> {
        let keys: Vec<Option<String>> = df
            .column(PARTITION_COLUMN)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();
        let distinct: BTreeSet<Option<&str>> = keys.iter().map(Option::as_deref).collect();

        let mut partitions = Vec::with_capacity(distinct.len());
        for value in distinct {
            let mask: Vec<bool> = keys.iter().map(|key| key.as_deref() == value).collect();
            let mask = BooleanChunked::from_slice("partition".into(), &mask);
            let mut part = df.filter(&mask)?.drop(PARTITION_COLUMN)?;

            let label = value.unwrap_or(NULL_PARTITION_VALUE);
            let dir_name = partition_dir_name(label);
            let dir = staging.join(&dir_name);
            fs::create_dir_all(&dir).map_err(|e| self.write_failed(&dir, e))?;

            let file_path = dir.join(PARTITION_FILE_NAME);
            let bytes = self.write_parquet_file(&mut part, &file_path)?;
            debug!(
                "Partition {}: {} rows, {} bytes",
                dir_name,
                part.height(),
                bytes
            );

            partitions.push(PartitionSummary {
                value: label.to_string(),
                path: self.output_path.join(&dir_name),
                rows: part.height(),
                bytes,
            });
        }
        Ok(partitions)
    }

    /// Write a single Parquet file and return its size
    fn write_parquet_file(&self, df: &mut DataFrame, path: &Path) -> Result<u64> {
        let parquet = &self.config.parquet_optimization;
        let file = fs::File::create(path).map_err(|e| self.write_failed(path, e))?;

        PolarsParquetWriter::new(file)
            .with_compression(parquet.compression_algorithm.to_polars_compression())
            .with_statistics(if parquet.enable_statistics {
                StatisticsOptions::full()
            } else {
                StatisticsOptions::empty()
            })
            .with_row_group_size(Some(parquet.row_group_size))
            .with_data_page_size(Some(parquet.data_page_size))
            .finish(df)
            .map_err(|e| CatalogError::WriteFailed {
                path: path.to_path_buf(),
                reason: format!("Failed to write parquet: {}", e),
            })?;

        Ok(fs::metadata(path).map_err(|e| self.write_failed(path, e))?.len())
    }

    /// Remove the previous output and move the staging directory onto it
    fn swap_into_place(&self, staging: &Path) -> Result<()> {
        if self.output_path.is_dir() {
            fs::remove_dir_all(&self.output_path)
                .map_err(|e| self.write_failed(&self.output_path, e))?;
        } else if self.output_path.exists() {
            fs::remove_file(&self.output_path)
                .map_err(|e| self.write_failed(&self.output_path, e))?;
        }
        fs::rename(staging, &self.output_path).map_err(|e| self.write_failed(staging, e))
    }

    /// Hidden sibling of the target directory
    fn staging_path(&self) -> Result<PathBuf> {
        let name = self
            .output_path
            .file_name()
            .ok_or_else(|| CatalogError::Configuration {
                message: format!(
                    "Output path {} must name a directory",
                    self.output_path.display()
                ),
            })?;
        Ok(self.output_path.with_file_name(format!(
            ".{}.staging-{}",
            name.to_string_lossy(),
            std::process::id()
        )))
    }

    fn write_failed(&self, path: &Path, error: std::io::Error) -> CatalogError {
        CatalogError::WriteFailed {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    }
}

/// Directory name of a partition, hive style
pub fn partition_dir_name(value: &str) -> String {
    format!("{}={}", PARTITION_COLUMN, escape_partition_value(value))
}

/// Percent-encode characters that cannot appear in a directory name
pub fn escape_partition_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_control() || "\"#%'*/:=?\\^{}[]<>|".contains(c) {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                escaped.push_str(&format!("%{:02X}", byte));
            }
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Reverse of [`escape_partition_value`]
pub fn unescape_partition_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Read every file of one `content_type` partition
///
/// The partition column is restored from the directory name and the result
/// follows the full output schema. A value with no partition yields an
/// empty frame.
pub fn read_partition(root: &Path, value: &str) -> Result<DataFrame> {
    let schema = OutputSchema::new();
    let dir = root.join(partition_dir_name(value));
    let pattern = format!(
        "{}/*.parquet",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let mut combined: Option<DataFrame> = None;
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| CatalogError::ReadFailed {
            path: dir.clone(),
            reason: e.to_string(),
        })?;
        let file = fs::File::open(&path)?;
        let df = ParquetReader::new(file).finish()?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&df)?;
            }
            None => combined = Some(df),
        }
    }

    let Some(mut df) = combined else {
        debug!("No partition for {}={} under {}", PARTITION_COLUMN, value, root.display());
        return Ok(DataFrame::empty_with_schema(&schema.to_polars_schema()));
    };

    let height = df.height();
    df.with_column(Series::new(PARTITION_COLUMN.into(), vec![value; height]))?;
    schema.conform(&df)
}

/// Enumerate the partition directories under `root`
pub fn list_partitions(root: &Path) -> Result<Vec<PartitionSummary>> {
    let prefix = format!("{}=", PARTITION_COLUMN);
    let mut partitions = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| CatalogError::ReadFailed {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_dir() || !name.starts_with(&prefix) {
            continue;
        }

        let mut rows = 0usize;
        let mut bytes = 0u64;
        for file in WalkDir::new(entry.path()).min_depth(1) {
            let file = file.map_err(|e| CatalogError::ReadFailed {
                path: entry.path().to_path_buf(),
                reason: e.to_string(),
            })?;
            if file.file_type().is_file()
                && file.path().extension().is_some_and(|ext| ext == "parquet")
            {
                bytes += fs::metadata(file.path())?.len();
                rows += ParquetReader::new(fs::File::open(file.path())?).num_rows()?;
            }
        }

        partitions.push(PartitionSummary {
            value: unescape_partition_value(&name[prefix.len()..]),
            path: entry.path().to_path_buf(),
            rows,
            bytes,
        });
    }
    Ok(partitions)
}
