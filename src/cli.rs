//! Command-line interface components.

use crate::config::{CompressionAlgorithm, ProcessorConfig};
use crate::constants::DEFAULT_INPUT_PATH;
use crate::models::ProcessingStats;
use crate::processor::CatalogProcessor;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "catalog_processor")]
#[command(about = "Clean a raw catalog CSV into content-type partitioned Parquet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the raw catalog CSV
    #[arg(value_name = "INPUT_PATH", default_value = DEFAULT_INPUT_PATH)]
    pub input_path: PathBuf,

    /// Output directory for the partitioned dataset (replaced on every run)
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: String,

    /// Read and clean the catalog, report, but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Log level selected by the flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the processor configuration from the flags
    pub fn to_config(&self) -> Result<ProcessorConfig> {
        let compression: CompressionAlgorithm = self
            .compression
            .parse()
            .context("Invalid --compression value")?;

        let mut config = ProcessorConfig::default().with_compression(compression);
        if self.dry_run {
            config = config.with_dry_run();
        }
        Ok(config)
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("catalog_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Run one processing pass for the parsed arguments
pub async fn run(args: Args) -> Result<ProcessingStats> {
    let config = args.to_config()?;

    let mut processor = CatalogProcessor::new(args.input_path.clone(), args.output_path.clone())
        .with_context(|| format!("Cannot open input {}", args.input_path.display()))?
        .with_config(config);

    let stats = processor.process().await.context("Catalog processing failed")?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["catalog_processor"]);
        assert_eq!(args.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
        assert!(args.output_path.is_none());
        assert_eq!(args.get_log_level(), "info");

        let config = args.to_config().unwrap();
        assert!(!config.dry_run);
        assert_eq!(
            config.parquet_optimization.compression_algorithm,
            CompressionAlgorithm::Snappy
        );
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "catalog_processor",
            "titles.csv",
            "--output-path",
            "out",
            "--compression",
            "zstd",
            "--dry-run",
            "-v",
        ]);
        assert_eq!(args.output_path, Some(PathBuf::from("out")));
        assert_eq!(args.get_log_level(), "debug");

        let config = args.to_config().unwrap();
        assert!(config.dry_run);
        assert_eq!(
            config.parquet_optimization.compression_algorithm,
            CompressionAlgorithm::Zstd
        );
    }

    #[test]
    fn test_bad_compression() {
        let args = Args::parse_from(["catalog_processor", "--compression", "brotli"]);
        assert!(args.to_config().is_err());
    }
}
