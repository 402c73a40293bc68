//! Duration decomposition into a numeric value and a unit.

use super::map_str_column;
use crate::constants::{DURATION, DURATION_UNIT, DURATION_VALUE};
use crate::error::Result;
use crate::models::{DurationUnit, NormalizationReport};

use polars::prelude::*;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// First run of digits in the text, or 0
///
/// A run too large for an Int32 column also yields 0.
pub fn extract_duration_value(value: Option<&str>) -> i32 {
    value
        .and_then(|text| DIGIT_RUN.find(text))
        .and_then(|run| run.as_str().parse::<i32>().ok())
        .unwrap_or(0)
}

/// Classify the unit from the original text
///
/// "min" is checked before "season", so text containing both is minutes.
pub fn classify_duration_unit(value: Option<&str>) -> DurationUnit {
    let Some(text) = value else {
        return DurationUnit::Unknown;
    };
    let text = text.to_lowercase();
    if text.contains("min") {
        DurationUnit::Minutes
    } else if text.contains("season") {
        DurationUnit::Seasons
    } else {
        DurationUnit::Unknown
    }
}

/// Add `duration_value` and `duration_unit`; `duration` itself is kept
pub fn decompose_durations(df: &mut DataFrame, report: &mut NormalizationReport) -> Result<()> {
    let values: Vec<i32> = map_str_column(df, DURATION, extract_duration_value)?;
    let units: Vec<DurationUnit> = map_str_column(df, DURATION, classify_duration_unit)?;

    let unknown = units
        .iter()
        .filter(|unit| **unit == DurationUnit::Unknown)
        .count();
    let units: Vec<&'static str> = units.iter().map(DurationUnit::as_str).collect();

    df.with_column(Series::new(DURATION_VALUE.into(), values))?;
    df.with_column(Series::new(DURATION_UNIT.into(), units))?;
    debug!("{} durations with unknown unit", unknown);
    report.unknown_durations = unknown;
    Ok(())
}
