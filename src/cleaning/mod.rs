//! Record normalization pipeline.
//!
//! Runs the cleaning stages in a fixed order over the raw catalog frame:
//! rename and dedup, text defaulting, rating sanitization, date and numeric
//! normalization, duration decomposition, then the derived columns. Every
//! stage past dedup is a per-row function; none of them can fail on bad
//! values, only on a missing column.

pub mod dates;
pub mod dedup;
pub mod duration;
pub mod rating;
pub mod text;

use crate::constants::{
    DESCRIPTION, DESCRIPTION_LENGTH, PROCESSED_TIMESTAMP, PROCESSING_DATE,
};
use crate::error::Result;
use crate::models::{NormalizationReport, RunMetadata};

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info};

/// Run every cleaning stage and add the derived columns
pub fn normalize(df: DataFrame, run: &RunMetadata) -> Result<(DataFrame, NormalizationReport)> {
    let mut report = NormalizationReport {
        rows_read: df.height(),
        ..Default::default()
    };

    // Stage 1: canonical names, then first-seen dedup and key filter
    let df = dedup::rename_columns(df)?;
    let (mut df, counts) = dedup::deduplicate(&df)?;
    report.duplicates_dropped = counts.duplicates;
    report.missing_keys_dropped = counts.missing_keys;
    info!("Rows after dedup: {}", df.height());

    // Stages 2-5
    text::apply_text_defaults(&mut df, &mut report)?;
    rating::sanitize_ratings(&mut df, &mut report)?;
    dates::normalize_date_added(&mut df, &mut report)?;
    dates::normalize_release_year(&mut df, &mut report)?;
    duration::decompose_durations(&mut df, &mut report)?;

    add_derived_columns(&mut df, run)?;

    report.rows_out = df.height();
    debug!("Normalization report: {:?}", report);
    Ok((df, report))
}

/// Add `description_length` and the run timestamps
fn add_derived_columns(df: &mut DataFrame, run: &RunMetadata) -> Result<()> {
    let lengths: Vec<i32> = map_str_column(df, DESCRIPTION, |value| {
        value.map_or(0, |text| text.chars().count() as i32)
    })?;
    df.with_column(Series::new(DESCRIPTION_LENGTH.into(), lengths))?;

    let height = df.height();
    df.with_column(date_series(
        PROCESSING_DATE,
        vec![run.processing_date; height],
    )?)?;

    let micros = run.processed_timestamp.and_utc().timestamp_micros();
    let timestamps = Series::new(PROCESSED_TIMESTAMP.into(), vec![micros; height])
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    df.with_column(timestamps)?;

    Ok(())
}

/// Map every value of a String column through `f`
pub(crate) fn map_str_column<T, F>(df: &DataFrame, name: &str, f: F) -> Result<Vec<T>>
where
    F: FnMut(Option<&str>) -> T,
{
    let values = df.column(name)?.as_materialized_series().str()?;
    Ok(values.into_iter().map(f).collect())
}

/// Build a Date series from calendar dates
pub(crate) fn date_series(name: &str, dates: Vec<NaiveDate>) -> Result<Series> {
    let days: Vec<i32> = dates.into_iter().map(days_since_epoch).collect();
    Ok(Series::new(name.into(), days).cast(&DataType::Date)?)
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    date.signed_duration_since(epoch).num_days() as i32
}
