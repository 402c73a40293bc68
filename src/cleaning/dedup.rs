//! Column rename and record dedup.
//!
//! Duplicates are resolved before the key filter: a first occurrence that
//! is later dropped for a missing title still shadows its duplicates.

use crate::constants::{COLUMN_RENAMES, SHOW_ID, TITLE};
use crate::error::Result;

use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Rows removed by [`deduplicate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupCounts {
    pub duplicates: usize,
    pub missing_keys: usize,
}

/// Rename source columns to their canonical names
///
/// Source columns that are not present are skipped.
pub fn rename_columns(mut df: DataFrame) -> Result<DataFrame> {
    for (source, canonical) in COLUMN_RENAMES {
        if df.column(source).is_ok() {
            df.rename(source, (*canonical).into())?;
            debug!("Renamed column {} -> {}", source, canonical);
        }
    }
    Ok(df)
}

/// Drop repeated `show_id` values (first wins), then rows missing a key
pub fn deduplicate(df: &DataFrame) -> Result<(DataFrame, DedupCounts)> {
    let keep_plan = {
        let show_ids = df.column(SHOW_ID)?.as_materialized_series().str()?;
        let titles = df.column(TITLE)?.as_materialized_series().str()?;
        plan_rows(show_ids.into_iter().zip(titles.into_iter()))
    };

    let mask: Vec<bool> = keep_plan.iter().map(|row| *row == RowFate::Keep).collect();
    let counts = DedupCounts {
        duplicates: keep_plan
            .iter()
            .filter(|row| **row == RowFate::Duplicate)
            .count(),
        missing_keys: keep_plan
            .iter()
            .filter(|row| **row == RowFate::MissingKey)
            .count(),
    };

    debug!(
        "Dedup: {} duplicates, {} rows missing show_id/title",
        counts.duplicates, counts.missing_keys
    );

    let mask = BooleanChunked::from_slice("keep".into(), &mask);
    Ok((df.filter(&mask)?, counts))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowFate {
    Keep,
    Duplicate,
    MissingKey,
}

/// Decide the fate of each `(show_id, title)` row in input order
fn plan_rows<'a, I>(rows: I) -> Vec<RowFate>
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    // Null ids share one slot, like any other repeated key.
    let mut seen: HashSet<Option<&'a str>> = HashSet::new();
    rows.into_iter()
        .map(|(show_id, title)| {
            if !seen.insert(show_id) {
                RowFate::Duplicate
            } else if !is_present(show_id) || !is_present(title) {
                RowFate::MissingKey
            } else {
                RowFate::Keep
            }
        })
        .collect()
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(ids: &[Option<&str>], titles: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![
            Column::new("show_id".into(), ids),
            Column::new("title".into(), titles),
        ])
        .unwrap()
    }

    fn show_ids(df: &DataFrame) -> Vec<Option<String>> {
        df.column("show_id")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_rename_columns() {
        let df = DataFrame::new(vec![
            Column::new("type".into(), &["Movie"]),
            Column::new("listed_in".into(), &["Dramas"]),
            Column::new("cast".into(), &["A, B"]),
            Column::new("title".into(), &["X"]),
        ])
        .unwrap();

        let df = rename_columns(df).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["content_type", "genre", "cast_and_crew", "title"]);
    }

    #[test]
    fn test_rename_skips_absent_columns() {
        let df = DataFrame::new(vec![Column::new("title".into(), &["X"])]).unwrap();
        let df = rename_columns(df).unwrap();
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let df = frame(
            &[Some("s1"), Some("s2"), Some("s1")],
            &[Some("first"), Some("other"), Some("second")],
        );
        let (out, counts) = deduplicate(&df).unwrap();

        assert_eq!(out.height(), 2);
        assert_eq!(counts.duplicates, 1);
        assert_eq!(counts.missing_keys, 0);
        let titles = out.column("title").unwrap().as_materialized_series().str().unwrap().clone();
        assert_eq!(titles.get(0), Some("first"));
    }

    #[test]
    fn test_missing_keys_dropped() {
        let df = frame(
            &[Some("s1"), None, Some("s3"), Some("")],
            &[Some("ok"), Some("no id"), None, Some("empty id")],
        );
        let (out, counts) = deduplicate(&df).unwrap();

        assert_eq!(show_ids(&out), vec![Some("s1".to_string())]);
        assert_eq!(counts.missing_keys, 3);
        assert_eq!(counts.duplicates, 0);
    }

    #[test]
    fn test_dedup_runs_before_key_filter() {
        // The untitled first occurrence still shadows the titled duplicate
        let df = frame(&[Some("s1"), Some("s1")], &[None, Some("titled")]);
        let (out, counts) = deduplicate(&df).unwrap();

        assert_eq!(out.height(), 0);
        assert_eq!(counts.duplicates, 1);
        assert_eq!(counts.missing_keys, 1);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let df = frame(
            &[Some("a"), Some("b"), Some("a"), None, Some("c"), Some("b")],
            &[Some("1"), Some("2"), Some("3"), Some("4"), None, Some("6")],
        );
        let (once, _) = deduplicate(&df).unwrap();
        let (twice, counts) = deduplicate(&once).unwrap();

        assert_eq!(show_ids(&once), show_ids(&twice));
        assert_eq!(counts, DedupCounts::default());
    }

    #[test]
    fn test_output_keys_unique() {
        let ids: Vec<Option<&str>> = ["x", "y", "x", "z", "y", "x"].iter().map(|s| Some(*s)).collect();
        let titles = vec![Some("t"); ids.len()];
        let (out, _) = deduplicate(&frame(&ids, &titles)).unwrap();

        let ids = show_ids(&out);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(ids.len(), 3);
    }
}
