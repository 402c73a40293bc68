//! Date and numeric normalization.
//!
//! `date_added` is parsed from "<Month> <Day>, <Year>" and falls back to the
//! 1900-01-01 sentinel; `release_year` falls back to 0.

use super::{date_series, map_str_column};
use crate::constants::{
    DATE_ADDED, DATE_ADDED_FORMAT, DEFAULT_RELEASE_YEAR, MONTH_NAMES, RELEASE_YEAR, SENTINEL_DATE,
};
use crate::error::Result;
use crate::models::NormalizationReport;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::debug;

/// Parse a `date_added` value such as "September 25, 2021"
///
/// The month must be spelled out in full and the year must have four
/// digits; anything else is rejected.
pub fn parse_date_added(value: Option<&str>) -> Option<NaiveDate> {
    let text = value?.trim();

    let month = text.split_whitespace().next()?;
    if !MONTH_NAMES.contains(&month.to_ascii_lowercase().as_str()) {
        return None;
    }
    let year = text.rsplit(' ').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_ADDED_FORMAT).ok()
}

/// Parsed `date_added`, or the sentinel date
pub fn date_added_or_sentinel(value: Option<&str>) -> NaiveDate {
    parse_date_added(value).unwrap_or(SENTINEL_DATE)
}

/// Parse a `release_year` value
///
/// Integers parse directly; finite decimals truncate toward zero. Negative
/// or out-of-range values are rejected.
pub fn parse_release_year(value: Option<&str>) -> Option<i32> {
    let text = value?.trim();

    let year = match text.parse::<i64>() {
        Ok(year) => year,
        Err(_) => {
            let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
            float.trunc() as i64
        }
    };

    i32::try_from(year).ok().filter(|year| *year >= 0)
}

/// Parsed `release_year`, or 0
pub fn release_year_or_default(value: Option<&str>) -> i32 {
    parse_release_year(value).unwrap_or(DEFAULT_RELEASE_YEAR)
}

/// Replace the `date_added` text column with a Date column
pub fn normalize_date_added(df: &mut DataFrame, report: &mut NormalizationReport) -> Result<()> {
    let mut defaulted = 0usize;
    let dates = map_str_column(df, DATE_ADDED, |value| {
        parse_date_added(value).unwrap_or_else(|| {
            defaulted += 1;
            SENTINEL_DATE
        })
    })?;

    df.with_column(date_series(DATE_ADDED, dates)?)?;
    debug!("Substituted sentinel date for {} rows", defaulted);
    report.dates_defaulted = defaulted;
    Ok(())
}

/// Replace the `release_year` text column with an Int32 column
pub fn normalize_release_year(df: &mut DataFrame, report: &mut NormalizationReport) -> Result<()> {
    let mut defaulted = 0usize;
    let years: Vec<i32> = map_str_column(df, RELEASE_YEAR, |value| {
        parse_release_year(value).unwrap_or_else(|| {
            defaulted += 1;
            DEFAULT_RELEASE_YEAR
        })
    })?;

    df.with_column(Series::new(RELEASE_YEAR.into(), years))?;
    debug!("Defaulted release_year for {} rows", defaulted);
    report.release_years_defaulted = defaulted;
    Ok(())
}
