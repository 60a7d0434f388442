//! One-hot encoding of categorical columns.

use crate::error::{PrepError, Result};
use crate::utils::category_label;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One-hot encodes categorical columns into Float64 indicator columns.
///
/// `fit` records each column's category vocabulary in first-occurrence row
/// order; `transform` emits one `{column}_{category}` indicator per learned
/// category. Values not seen at fit time (and nulls) produce an all-zero
/// row in that column's block rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    // (column name, categories in first-occurrence order)
    vocabularies: Vec<(String, Vec<String>)>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the category vocabulary for each listed column.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.vocabularies.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?;
            // Series::iter requires a single-chunk series
            let series = column.as_materialized_series().rechunk();

            let mut categories: Vec<String> = Vec::new();
            for value in series.iter() {
                if matches!(value, AnyValue::Null) {
                    continue;
                }
                let label = category_label(&value);
                if !categories.contains(&label) {
                    categories.push(label);
                }
            }

            self.vocabularies.push((col_name.to_string(), categories));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Produce the indicator block for all fitted columns.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted("OneHotEncoder"));
        }

        let mut indicator_columns: Vec<Column> = Vec::new();
        for (col_name, categories) in &self.vocabularies {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?;
            // Series::iter requires a single-chunk series
            let series = column.as_materialized_series().rechunk();

            let labels: Vec<Option<String>> = series
                .iter()
                .map(|value| {
                    if matches!(value, AnyValue::Null) {
                        None
                    } else {
                        Some(category_label(&value))
                    }
                })
                .collect();

            for category in categories {
                let indicator: Float64Chunked = labels
                    .iter()
                    .map(|label| {
                        Some(match label {
                            Some(l) if l == category => 1.0,
                            _ => 0.0,
                        })
                    })
                    .collect();

                let name = format!("{}_{}", col_name, category);
                indicator_columns.push(
                    indicator
                        .with_name(name.as_str().into())
                        .into_series()
                        .into(),
                );
            }
        }

        Ok(DataFrame::new(indicator_columns)?)
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Total number of indicator columns this encoder will produce.
    pub fn output_width(&self) -> usize {
        self.vocabularies
            .iter()
            .map(|(_, categories)| categories.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_indicator_per_category() {
        let df = df![
            "cp" => ["typical", "atypical", "typical", "asymptomatic"],
        ]
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["cp"]).unwrap();

        assert_eq!(result.width(), 3);
        assert_eq!(result.height(), 4);

        let typical = result
            .column("cp_typical")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert_eq!(typical.get(0), Some(1.0));
        assert_eq!(typical.get(1), Some(0.0));
        assert_eq!(typical.get(2), Some(1.0));
    }

    #[test]
    fn test_vocabulary_in_first_occurrence_order() {
        let df = df![
            "slope" => ["down", "up", "flat", "up"],
        ]
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["slope"]).unwrap();

        let names: Vec<String> = result
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "slope_down".to_string(),
                "slope_up".to_string(),
                "slope_flat".to_string()
            ]
        );
    }

    #[test]
    fn test_unknown_category_encodes_as_zero_row() {
        let fit_df = df![
            "thal" => ["A", "B", "A"],
        ]
        .unwrap();
        let transform_df = df![
            "thal" => ["C"],
        ]
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&fit_df, &["thal"]).unwrap();
        let result = encoder.transform(&transform_df).unwrap();

        assert_eq!(result.width(), 2);
        for column in result.get_columns() {
            let ca = column.as_materialized_series().f64().unwrap().clone();
            assert_eq!(ca.get(0), Some(0.0));
        }
    }

    #[test]
    fn test_null_encodes_as_zero_row() {
        let df = df![
            "exang" => [Some("yes"), Some("no"), None],
        ]
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["exang"]).unwrap();

        for column in result.get_columns() {
            let ca = column.as_materialized_series().f64().unwrap().clone();
            assert_eq!(ca.get(2), Some(0.0));
        }
    }

    #[test]
    fn test_multiple_columns_keep_declared_order() {
        let df = df![
            "sex" => ["m", "f"],
            "fbs" => ["t", "f"],
        ]
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["sex", "fbs"]).unwrap();

        let names: Vec<String> = result
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names[0], "sex_m");
        assert_eq!(names[3], "fbs_f");
        assert_eq!(encoder.output_width(), 4);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let df = df![
            "sex" => ["m", "f"],
        ]
        .unwrap();

        let encoder = OneHotEncoder::new();
        let err = encoder.transform(&df).unwrap_err();
        assert!(matches!(err, PrepError::NotFitted(_)));
    }

    #[test]
    fn test_numeric_coded_categories() {
        let df = df![
            "restecg" => [0.0, 1.0, 2.0, 0.0],
        ]
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["restecg"]).unwrap();

        assert_eq!(result.width(), 3);
        // Each row has exactly one indicator set
        for row in 0..4 {
            let sum: f64 = result
                .get_columns()
                .iter()
                .map(|c| {
                    c.as_materialized_series()
                        .f64()
                        .unwrap()
                        .get(row)
                        .unwrap()
                })
                .sum();
            assert_eq!(sum, 1.0);
        }
    }
}
