//! Configuration management and validation.
//!
//! Provides configuration structures for a processing run and for the
//! Parquet files written by the partitioned writer.

use crate::constants::{DEFAULT_DATA_PAGE_SIZE, DEFAULT_ROW_GROUP_SIZE};
use crate::error::{CatalogError, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parquet-specific output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParquetOptimizationConfig {
    /// Compression algorithm selection
    pub compression_algorithm: CompressionAlgorithm,

    /// Enable column statistics for query pruning
    pub enable_statistics: bool,

    /// Rows per row group
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl Default for ParquetOptimizationConfig {
    fn default() -> Self {
        Self {
            compression_algorithm: CompressionAlgorithm::Snappy,
            enable_statistics: true,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            data_page_size: DEFAULT_DATA_PAGE_SIZE,
        }
    }
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(CatalogError::Configuration {
                message: format!(
                    "Unknown compression '{}' (expected snappy, zstd, lz4 or none)",
                    other
                ),
            }),
        }
    }
}

/// Global configuration for a processing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Read and normalize, report, but write nothing
    pub dry_run: bool,

    /// Parquet output configuration
    pub parquet_optimization: ParquetOptimizationConfig,
}

impl ProcessorConfig {
    /// Enable dry run mode
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Select the parquet compression algorithm
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.parquet_optimization.compression_algorithm = compression;
        self
    }

    /// Configure parquet optimization settings
    pub fn with_parquet_optimization(mut self, config: ParquetOptimizationConfig) -> Self {
        self.parquet_optimization = config;
        self
    }

    /// Reject settings the writer cannot honour
    pub fn validate(&self) -> Result<()> {
        let parquet = &self.parquet_optimization;
        if parquet.row_group_size == 0 {
            return Err(CatalogError::Configuration {
                message: "row_group_size must be greater than zero".to_string(),
            });
        }
        if parquet.data_page_size == 0 {
            return Err(CatalogError::Configuration {
                message: "data_page_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert!(!config.dry_run);
        assert_eq!(
            config.parquet_optimization.compression_algorithm,
            CompressionAlgorithm::Snappy
        );
        assert!(config.parquet_optimization.enable_statistics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_compression_parsing() {
        assert_eq!(
            "snappy".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Snappy
        );
        assert_eq!(
            "ZSTD".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Zstd
        );
        assert_eq!(
            "none".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Uncompressed
        );
        assert!("brotli".parse::<CompressionAlgorithm>().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = ProcessorConfig::default()
            .with_dry_run()
            .with_compression(CompressionAlgorithm::Lz4);
        assert!(config.dry_run);
        assert_eq!(
            config.parquet_optimization.compression_algorithm,
            CompressionAlgorithm::Lz4
        );
    }

    #[test]
    fn test_zero_row_group_size_rejected() {
        let config = ProcessorConfig::default().with_parquet_optimization(
            ParquetOptimizationConfig {
                row_group_size: 0,
                ..Default::default()
            },
        );
        assert!(matches!(
            config.validate(),
            Err(CatalogError::Configuration { .. })
        ));
    }
}
