//! Allow-list sanitizer for the `rating` column.

use super::map_str_column;
use crate::constants::{FALLBACK_RATING, NULL_RATING_TEXT, RATING, VALID_RATINGS};
use crate::error::Result;
use crate::models::NormalizationReport;

use polars::prelude::*;
use tracing::debug;

/// Map a raw rating onto the allow-list
///
/// A null rating is stringified to "None" first, which is not allow-listed
/// and therefore lands on the fallback like any other unknown code.
pub fn sanitize_rating(value: Option<&str>) -> &'static str {
    let trimmed = value.unwrap_or(NULL_RATING_TEXT).trim();
    VALID_RATINGS
        .iter()
        .find(|rating| **rating == trimmed)
        .copied()
        .unwrap_or(FALLBACK_RATING)
}

/// Rewrite the `rating` column in place
pub fn sanitize_ratings(df: &mut DataFrame, report: &mut NormalizationReport) -> Result<()> {
    let mut remapped = 0usize;
    let ratings: Vec<&'static str> = map_str_column(df, RATING, |value| {
        let rating = sanitize_rating(value);
        if rating == FALLBACK_RATING && value.map(str::trim) != Some(FALLBACK_RATING) {
            remapped += 1;
        }
        rating
    })?;

    df.with_column(Series::new(RATING.into(), ratings))?;
    debug!("Remapped {} ratings to {}", remapped, FALLBACK_RATING);
    report.ratings_remapped = remapped;
    Ok(())
}
