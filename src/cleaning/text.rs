//! Text defaulting for the free-text columns.

use super::map_str_column;
use crate::constants::TEXT_DEFAULTS;
use crate::error::Result;
use crate::models::NormalizationReport;

use polars::prelude::*;
use tracing::debug;

/// Replace a null or empty value with `default`
///
/// Whitespace-only values are not trimmed and pass through unchanged.
pub fn default_text<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => default,
    }
}

/// Apply the column defaults in [`TEXT_DEFAULTS`]
pub fn apply_text_defaults(df: &mut DataFrame, report: &mut NormalizationReport) -> Result<()> {
    for (column, default) in TEXT_DEFAULTS {
        let mut defaulted = 0usize;
        let values: Vec<String> = map_str_column(df, column, |value| {
            let cleaned = default_text(value, default);
            if value.is_none_or(str::is_empty) {
                defaulted += 1;
            }
            cleaned.to_string()
        })?;

        df.with_column(Series::new((*column).into(), values))?;
        debug!("Defaulted {} values in {}", defaulted, column);
        report.defaulted_fields.insert(column.to_string(), defaulted);
    }
    Ok(())
}
