//! Main processing engine.
//!
//! Orchestrates one batch run: read the raw catalog, normalize it, conform
//! it to the output schema, then write the partitioned Parquet dataset.

pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::writer::PartitionedWriter;

use crate::cleaning;
use crate::config::ProcessorConfig;
use crate::constants::DEFAULT_OUTPUT_PATH;
use crate::error::{CatalogError, Result};
use crate::models::{NormalizationReport, ProcessingStats, RunMetadata};
use crate::schema::OutputSchema;

use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::debug;

/// Main processor for catalog conversion
#[derive(Debug)]
pub struct CatalogProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: ProcessorConfig,
    writer: PartitionedWriter,
    schema: OutputSchema,
    run: Option<RunMetadata>,
}

impl CatalogProcessor {
    /// Create a new catalog processor
    ///
    /// Without an explicit output path, `data/raw/titles.csv` writes to
    /// `data/processed`.
    pub fn new(input_path: PathBuf, output_path: Option<PathBuf>) -> Result<Self> {
        let output_path = output_path.unwrap_or_else(|| {
            input_path
                .parent()
                .and_then(Path::parent)
                .map(|root| root.join("processed"))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
        });

        // Verify input path exists
        if !input_path.exists() {
            return Err(CatalogError::InputNotFound { path: input_path });
        }

        let config = ProcessorConfig::default();
        Ok(Self {
            input_path,
            writer: PartitionedWriter::new(output_path.clone(), config.clone()),
            output_path,
            config,
            schema: OutputSchema::new(),
            run: None,
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config.clone();
        self.writer = PartitionedWriter::new(self.output_path.clone(), config);
        self
    }

    /// Pin the run timestamps instead of taking them at process time
    pub fn with_run_metadata(mut self, run: RunMetadata) -> Self {
        self.run = Some(run);
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Main processing entry point
    pub async fn process(&mut self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;
        let run = *self.run.get_or_insert_with(RunMetadata::now);

        println!("{}", "Starting catalog processing".bright_green().bold());
        println!("  {} {}", "Input:".bright_cyan(), self.input_path.display());
        println!("  {} {}", "Output:".bright_cyan(), self.output_path.display());

        // Step 1: Read raw catalog
        println!("\n{}", "Reading raw catalog...".bright_yellow());
        let input_path = self.input_path.clone();
        let raw = task::spawn_blocking(move || reader::read_catalog_csv(&input_path))
            .await
            .map_err(|e| CatalogError::ReadFailed {
                path: self.input_path.clone(),
                reason: format!("Failed to spawn read task: {}", e),
            })??;
        println!(
            "  {} {} rows",
            "Read".bright_green(),
            raw.height().to_string().bright_white().bold()
        );

        // Step 2: Clean and derive columns
        println!("\n{}", "Normalizing records...".bright_yellow());
        let schema = self.schema.clone();
        let (cleaned, report) = task::spawn_blocking(move || {
            let (df, report) = cleaning::normalize(raw, &run)?;
            Ok::<_, CatalogError>((schema.conform(&df)?, report))
        })
        .await
        .map_err(|e| CatalogError::ReadFailed {
            path: self.input_path.clone(),
            reason: format!("Failed to spawn normalization task: {}", e),
        })??;
        print_report(&report);

        // Step 3: Handle dry run
        if self.config.dry_run {
            println!("\n{}", "Dry run - nothing written".bright_green());
            return Ok(ProcessingStats {
                rows_written: 0,
                partitions: Vec::new(),
                report,
                output_path: self.output_path.clone(),
                processing_time_ms: start_time.elapsed().as_millis(),
            });
        }

        // Step 4: Write partitioned output
        println!("\n{}", "Writing partitioned parquet...".bright_yellow());
        let partitions = self.writer.write_partitioned(cleaned).await?;
        let rows_written: usize = partitions.iter().map(|p| p.rows).sum();

        let total_time = start_time.elapsed().as_millis();
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            total_time.to_string().bright_white()
        );
        for partition in &partitions {
            println!(
                "  {} {} rows ({} bytes)",
                format!("{}:", partition.value).bright_cyan(),
                partition.rows.to_string().bright_white().bold(),
                partition.bytes
            );
        }
        println!(
            "  {} {}",
            "Total rows:".bright_cyan(),
            rows_written.to_string().bright_white().bold()
        );
        debug!("Run finished at {}", run.processed_timestamp);

        Ok(ProcessingStats {
            rows_written,
            partitions,
            report,
            output_path: self.output_path.clone(),
            processing_time_ms: total_time,
        })
    }
}

/// Print the data-quality counters of a run
fn print_report(report: &NormalizationReport) {
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        report.rows_read.to_string().bright_white()
    );
    if report.duplicates_dropped > 0 {
        println!(
            "  {} {}",
            "Duplicates dropped:".bright_red(),
            report.duplicates_dropped.to_string().bright_red()
        );
    }
    if report.missing_keys_dropped > 0 {
        println!(
            "  {} {}",
            "Missing show_id/title:".bright_red(),
            report.missing_keys_dropped.to_string().bright_red()
        );
    }
    for (column, count) in &report.defaulted_fields {
        if *count > 0 {
            println!(
                "  {} {}",
                format!("Defaulted {}:", column).bright_cyan(),
                count
            );
        }
    }
    println!(
        "  {} {}",
        "Ratings remapped to UR:".bright_cyan(),
        report.ratings_remapped
    );
    println!(
        "  {} {}",
        "Sentinel dates:".bright_cyan(),
        report.dates_defaulted
    );
    println!(
        "  {} {}",
        "Zeroed release years:".bright_cyan(),
        report.release_years_defaulted
    );
    println!(
        "  {} {}",
        "Unknown duration units:".bright_cyan(),
        report.unknown_durations
    );
    println!(
        "  {} {}",
        "Rows out:".bright_cyan(),
        report.rows_out.to_string().bright_white().bold()
    );
}
