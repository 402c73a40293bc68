//! Partition layout tests

use super::{sample_rows, write_catalog};
use crate::processor::CatalogProcessor;
use crate::processor::writer::{list_partitions, read_partition};

use polars::prelude::*;
use std::fs;
use tempfile::TempDir;

fn partition_dirs(root: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_one_directory_per_content_type() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_catalog(temp_dir.path(), &sample_rows());
    let output = temp_dir.path().join("processed");

    let mut processor = CatalogProcessor::new(input, Some(output.clone())).unwrap();
    processor.process().await.unwrap();

    assert_eq!(
        partition_dirs(&output),
        vec!["content_type=Movie", "content_type=TV Show"]
    );

    let listed = list_partitions(&output).unwrap();
    let values: Vec<&str> = listed.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(values, vec!["Movie", "TV Show"]);
    assert!(listed.iter().all(|p| p.rows == 2 && p.bytes > 0));
}

#[tokio::test]
async fn test_movie_partition_holds_only_movies() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_catalog(temp_dir.path(), &sample_rows());
    let output = temp_dir.path().join("processed");

    let mut processor = CatalogProcessor::new(input, Some(output.clone())).unwrap();
    processor.process().await.unwrap();

    let movies = read_partition(&output, "Movie").unwrap();
    let types: Vec<Option<&str>> = movies
        .column("content_type")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert!(!types.is_empty());
    assert!(types.iter().all(|t| *t == Some("Movie")));

    // Partition files do not store the partition column
    let file = fs::File::open(output.join("content_type=Movie").join("part-00000.parquet")).unwrap();
    let raw = ParquetReader::new(file).finish().unwrap();
    assert!(raw.column("content_type").is_err());
    assert_eq!(raw.width(), 16);
}

#[tokio::test]
async fn test_rerun_replaces_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("processed");

    let first = write_catalog(temp_dir.path(), &sample_rows());
    let mut processor = CatalogProcessor::new(first, Some(output.clone())).unwrap();
    processor.process().await.unwrap();
    assert_eq!(partition_dirs(&output).len(), 2);

    // Second run only has movies: the TV Show partition must disappear
    let second = write_catalog(
        temp_dir.path(),
        &[r#"m1,Movie,Only Movie,Dir,Cast,India,"March 3, 2019",2018,PG,88 min,Comedies,Fun"#],
    );
    let mut processor = CatalogProcessor::new(second, Some(output.clone())).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.rows_written, 1);
    assert_eq!(partition_dirs(&output), vec!["content_type=Movie"]);
    assert_eq!(read_partition(&output, "Movie").unwrap().height(), 1);
    assert_eq!(read_partition(&output, "TV Show").unwrap().height(), 0);

    // No staging directories are left behind
    let leftovers: Vec<String> = partition_dirs(temp_dir.path())
        .into_iter()
        .filter(|name| name.contains("staging"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_existing_output_directory_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_catalog(temp_dir.path(), &sample_rows());
    let output = temp_dir.path().join("processed");
    fs::create_dir_all(output.join("stale")).unwrap();

    let mut processor = CatalogProcessor::new(input, Some(output.clone())).unwrap();
    processor.process().await.unwrap();

    assert!(!output.join("stale").exists());
    assert_eq!(partition_dirs(&output).len(), 2);
}
