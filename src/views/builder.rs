//! View Builder Module
//! Derived, read-only summaries computed from the full farmer table. Every
//! view is a pure function of the table (plus the village filter for the
//! detail view) and is recomputed from scratch on each interaction.

use crate::data::schema;
use polars::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("column '{column}' is not present in the table")]
    MissingColumn { column: String },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One (category, count) slice of a grouped view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Summary views shown in the metric boxes and charts. A field is `None`
/// when its required column is missing; the other views are unaffected.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_farmers: Option<usize>,
    pub total_villages: Option<usize>,
    pub total_land_ha: Option<f64>,
    pub gender_distribution: Option<Vec<CategoryCount>>,
    pub crop_distribution: Option<Vec<CategoryCount>>,
}

impl DashboardSummary {
    pub fn compute(df: &DataFrame) -> Self {
        Self {
            total_farmers: skip_missing("total_farmers", ViewBuilder::total_farmers(df)),
            total_villages: skip_missing("total_villages", ViewBuilder::total_villages(df)),
            total_land_ha: skip_missing("total_land", ViewBuilder::total_land(df)),
            gender_distribution: skip_missing(
                "gender_distribution",
                ViewBuilder::gender_distribution(df),
            ),
            crop_distribution: skip_missing(
                "crop_distribution",
                ViewBuilder::crop_distribution(df),
            ),
        }
    }
}

/// A view whose required column is absent is omitted, never fatal.
fn skip_missing<T>(view: &'static str, result: Result<T, ViewError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ViewError::MissingColumn { column }) => {
            tracing::warn!(view, column = %column, "column not present, view skipped");
            None
        }
        Err(e) => {
            tracing::warn!(view, error = %e, "view skipped");
            None
        }
    }
}

/// Computes the dashboard views. Stateless; associated functions only.
pub struct ViewBuilder;

impl ViewBuilder {
    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ViewError> {
        df.column(name).map_err(|_| ViewError::MissingColumn {
            column: name.to_string(),
        })
    }

    /// Count of distinct non-null values in a column. Duplicate farmer IDs
    /// stay duplicated in the table; only the distinct count is reported.
    fn distinct_count(df: &DataFrame, name: &str) -> Result<usize, ViewError> {
        let series = Self::column(df, name)?.as_materialized_series();
        let mut n = series.n_unique()?;
        if series.null_count() > 0 {
            n -= 1;
        }
        Ok(n)
    }

    pub fn total_farmers(df: &DataFrame) -> Result<usize, ViewError> {
        Self::distinct_count(df, schema::FARMER_ID)
    }

    pub fn total_villages(df: &DataFrame) -> Result<usize, ViewError> {
        Self::distinct_count(df, schema::VILLAGE)
    }

    /// Sum of the land-area column across all rows; 0.0 for an empty table.
    pub fn total_land(df: &DataFrame) -> Result<f64, ViewError> {
        let area = Self::column(df, schema::AREA_HA)?.cast(&DataType::Float64)?;
        Ok(area.f64()?.sum().unwrap_or(0.0))
    }

    pub fn gender_distribution(df: &DataFrame) -> Result<Vec<CategoryCount>, ViewError> {
        Self::count_by(df, schema::GENDER)
    }

    pub fn crop_distribution(df: &DataFrame) -> Result<Vec<CategoryCount>, ViewError> {
        Self::count_by(df, schema::CROP_AREA)
    }

    /// Group rows by a column and count per category, most frequent first
    /// (ties broken alphabetically). Nulls are not a category.
    fn count_by(df: &DataFrame, column: &str) -> Result<Vec<CategoryCount>, ViewError> {
        let series = Self::column(df, column)?.as_materialized_series();

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for i in 0..series.len() {
            let Ok(val) = series.get(i) else { continue };
            if val.is_null() {
                continue;
            }
            let key = val.to_string().trim_matches('"').to_string();
            *counts.entry(key).or_default() += 1;
        }

        let mut result: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        result.sort_by_key(|c| (Reverse(c.count), c.category.clone()));
        Ok(result)
    }

    /// Sorted distinct village names, feeding the village selector.
    pub fn villages(df: &DataFrame) -> Vec<String> {
        df.column(schema::VILLAGE)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                let mut villages: Vec<String> = (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect();
                villages.sort();
                villages
            })
            .unwrap_or_default()
    }

    /// Rows for one village, projected onto the detail columns that exist in
    /// the table. A village with no rows yields an empty frame, not an error.
    pub fn village_detail(df: &DataFrame, village: &str) -> Result<DataFrame, ViewError> {
        Self::column(df, schema::VILLAGE)?;

        let projection: Vec<Expr> = schema::DETAIL_COLUMNS
            .iter()
            .filter(|name| df.column(name).is_ok())
            .map(|name| col(*name))
            .collect();

        let detail = df
            .clone()
            .lazy()
            .filter(col(schema::VILLAGE).eq(lit(village)))
            .select(projection)
            .collect()?;
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataFrame {
        df!(
            schema::FARMER_ID => [1i64, 2, 3],
            schema::FARMER_NAME => ["Asha", "Bala", "Chitra"],
            schema::MOBILE_NO => ["9000000001", "9000000002", "9000000003"],
            schema::VILLAGE => ["A", "A", "B"],
            schema::GENDER => ["M", "F", "F"],
            schema::AREA_HA => [2.0, 3.0, 1.5],
        )
        .unwrap()
    }

    fn empty_table() -> DataFrame {
        df!(
            schema::FARMER_ID => Vec::<i64>::new(),
            schema::VILLAGE => Vec::<String>::new(),
            schema::GENDER => Vec::<String>::new(),
            schema::AREA_HA => Vec::<f64>::new(),
        )
        .unwrap()
    }

    #[test]
    fn totals_match_sample_table() {
        let df = sample_table();
        assert_eq!(ViewBuilder::total_farmers(&df).unwrap(), 3);
        assert_eq!(ViewBuilder::total_villages(&df).unwrap(), 2);
        assert_eq!(ViewBuilder::total_land(&df).unwrap(), 6.5);
    }

    #[test]
    fn totals_on_empty_table_are_zero() {
        let df = empty_table();
        assert_eq!(ViewBuilder::total_farmers(&df).unwrap(), 0);
        assert_eq!(ViewBuilder::total_villages(&df).unwrap(), 0);
        assert_eq!(ViewBuilder::total_land(&df).unwrap(), 0.0);
    }

    #[test]
    fn duplicate_farmer_ids_are_counted_distinct_not_deduplicated() {
        let df = df!(
            schema::FARMER_ID => [1i64, 1, 2],
            schema::VILLAGE => ["A", "A", "B"],
        )
        .unwrap();
        assert_eq!(ViewBuilder::total_farmers(&df).unwrap(), 2);
        // rows themselves stay duplicated
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn gender_distribution_counts_categories() {
        let counts = ViewBuilder::gender_distribution(&sample_table()).unwrap();
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    category: "F".to_string(),
                    count: 2
                },
                CategoryCount {
                    category: "M".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn missing_gender_column_skips_only_that_view() {
        let df = sample_table().drop(schema::GENDER).unwrap();

        let err = ViewBuilder::gender_distribution(&df).unwrap_err();
        assert!(matches!(err, ViewError::MissingColumn { .. }));

        // the other views still compute
        assert_eq!(ViewBuilder::total_farmers(&df).unwrap(), 3);
        assert_eq!(ViewBuilder::total_land(&df).unwrap(), 6.5);

        let summary = DashboardSummary::compute(&df);
        assert!(summary.gender_distribution.is_none());
        assert_eq!(summary.total_farmers, Some(3));
        assert_eq!(summary.total_land_ha, Some(6.5));
    }

    #[test]
    fn crop_view_is_skipped_when_column_absent_and_computed_when_present() {
        let without = sample_table();
        assert!(DashboardSummary::compute(&without)
            .crop_distribution
            .is_none());

        let with = df!(
            schema::FARMER_ID => [1i64, 2, 3],
            schema::VILLAGE => ["A", "A", "B"],
            schema::AREA_HA => [2.0, 3.0, 1.5],
            schema::CROP_AREA => ["Wheat", "Wheat", "Onion"],
        )
        .unwrap();
        let crops = DashboardSummary::compute(&with).crop_distribution.unwrap();
        assert_eq!(crops[0].category, "Wheat");
        assert_eq!(crops[0].count, 2);
        assert_eq!(crops[1].category, "Onion");
        assert_eq!(crops[1].count, 1);
    }

    #[test]
    fn village_detail_filters_and_projects() {
        let df = sample_table();
        let detail = ViewBuilder::village_detail(&df, "A").unwrap();

        assert_eq!(detail.height(), 2);
        assert_eq!(detail.width(), schema::DETAIL_COLUMNS.len());

        let villages = detail.column(schema::VILLAGE).unwrap().str().unwrap();
        for i in 0..detail.height() {
            assert_eq!(villages.get(i), Some("A"));
        }

        let ids = detail.column(schema::FARMER_ID).unwrap().i64().unwrap();
        assert_eq!(ids.get(0), Some(1));
        assert_eq!(ids.get(1), Some(2));
    }

    #[test]
    fn village_detail_for_unknown_village_is_empty_not_an_error() {
        let detail = ViewBuilder::village_detail(&sample_table(), "Nowhere").unwrap();
        assert_eq!(detail.height(), 0);
    }

    #[test]
    fn villages_are_distinct_and_sorted() {
        assert_eq!(ViewBuilder::villages(&sample_table()), vec!["A", "B"]);
        assert!(ViewBuilder::villages(&empty_table()).is_empty());

        let no_village = sample_table().drop(schema::VILLAGE).unwrap();
        assert!(ViewBuilder::villages(&no_village).is_empty());
    }

    #[test]
    fn summary_matches_reference_rows() {
        let summary = DashboardSummary::compute(&sample_table());
        assert_eq!(summary.total_farmers, Some(3));
        assert_eq!(summary.total_villages, Some(2));
        assert_eq!(summary.total_land_ha, Some(6.5));
        let gender = summary.gender_distribution.unwrap();
        assert_eq!(gender.len(), 2);
        assert_eq!(gender.iter().map(|c| c.count).sum::<usize>(), 3);
    }
}
