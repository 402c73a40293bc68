//! Application constants for the catalog processor
//!
//! Column names, rename mappings, defaulting tables, the rating allow-list
//! and the sentinel values used by the cleaning stages.

use chrono::NaiveDate;

// =============================================================================
// Source Columns
// =============================================================================

/// Source columns that must be present in the raw CSV header
pub const REQUIRED_SOURCE_COLUMNS: &[&str] = &[
    "show_id",
    "type",
    "title",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
    "description",
];

/// Source column name -> canonical column name
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("type", "content_type"),
    ("listed_in", "genre"),
    ("cast", "cast_and_crew"),
];

// =============================================================================
// Canonical Columns
// =============================================================================

pub const SHOW_ID: &str = "show_id";
pub const TITLE: &str = "title";
pub const CONTENT_TYPE: &str = "content_type";
pub const DIRECTOR: &str = "director";
pub const CAST_AND_CREW: &str = "cast_and_crew";
pub const COUNTRY: &str = "country";
pub const DATE_ADDED: &str = "date_added";
pub const RELEASE_YEAR: &str = "release_year";
pub const RATING: &str = "rating";
pub const DURATION: &str = "duration";
pub const DURATION_VALUE: &str = "duration_value";
pub const DURATION_UNIT: &str = "duration_unit";
pub const GENRE: &str = "genre";
pub const DESCRIPTION: &str = "description";
pub const DESCRIPTION_LENGTH: &str = "description_length";
pub const PROCESSING_DATE: &str = "processing_date";
pub const PROCESSED_TIMESTAMP: &str = "processed_timestamp";

/// Column the output dataset is physically partitioned by
pub const PARTITION_COLUMN: &str = CONTENT_TYPE;

// =============================================================================
// Cleaning Rules
// =============================================================================

/// Free-text columns and the value substituted when they are null or empty
pub const TEXT_DEFAULTS: &[(&str, &str)] = &[
    (DIRECTOR, "Unknown"),
    (CAST_AND_CREW, "Not Available"),
    (COUNTRY, "Unknown"),
    (GENRE, "Uncategorized"),
    (DESCRIPTION, "No Description Available"),
];

/// Ratings accepted verbatim (case-sensitive, after trimming)
pub const VALID_RATINGS: &[&str] = &[
    "TV-MA", "TV-14", "TV-PG", "R", "PG-13", "TV-Y7", "TV-Y", "PG", "G", "NC-17", "NR", "TV-G",
    "TV-Y7-FV", "UR", "UNRATED",
];

/// Rating assigned to anything outside the allow-list
pub const FALLBACK_RATING: &str = "UR";

/// Text a null rating is coerced to before the allow-list check
pub const NULL_RATING_TEXT: &str = "None";

/// Date format of `date_added`, e.g. "September 25, 2021"
pub const DATE_ADDED_FORMAT: &str = "%B %d, %Y";

/// Full English month names accepted in `date_added`
pub const MONTH_NAMES: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Sentinel substituted for missing or unparseable `date_added`
pub const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("sentinel date must be valid"),
};

/// Value substituted for missing or unparseable `release_year`
pub const DEFAULT_RELEASE_YEAR: i32 = 0;

// =============================================================================
// Parquet Writer Configuration
// =============================================================================

/// Hive convention for a null partition value
pub const NULL_PARTITION_VALUE: &str = "__HIVE_DEFAULT_PARTITION__";

/// File name written inside each partition directory
pub const PARTITION_FILE_NAME: &str = "part-00000.parquet";

/// Rows per Parquet row group
pub const DEFAULT_ROW_GROUP_SIZE: usize = 128 * 1024;

/// Data page size in bytes
pub const DEFAULT_DATA_PAGE_SIZE: usize = 1024 * 1024;

// =============================================================================
// Paths
// =============================================================================

/// Raw catalog read when no input path is given
pub const DEFAULT_INPUT_PATH: &str = "data/raw/netflix_titles.csv";

/// Output root used when no output path is given
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rating_allow_list_has_fifteen_unique_codes() {
        let unique: HashSet<_> = VALID_RATINGS.iter().collect();
        assert_eq!(VALID_RATINGS.len(), 15);
        assert_eq!(unique.len(), 15);
        assert!(VALID_RATINGS.contains(&FALLBACK_RATING));
    }

    #[test]
    fn test_sentinel_date() {
        assert_eq!(SENTINEL_DATE.to_string(), "1900-01-01");
    }

    #[test]
    fn test_renamed_columns_are_required() {
        for (source, _) in COLUMN_RENAMES {
            assert!(REQUIRED_SOURCE_COLUMNS.contains(source));
        }
    }
}
