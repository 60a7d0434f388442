//! Fixed schema of the UCI Heart Disease dataset (Cleveland subset).
//!
//! The column lists below are dataset-specific domain knowledge, encoded as
//! constants rather than inferred from the data. The categorical/numeric
//! partition drives which transformer each column goes through.

use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Categorical feature columns, one-hot encoded by the pipeline.
pub const CATEGORICAL_FEATURES: [&str; 7] =
    ["sex", "cp", "fbs", "restecg", "exang", "slope", "thal"];

/// Numeric feature columns, standardized when scaling is enabled.
pub const NUMERIC_FEATURES: [&str; 6] =
    ["age", "trestbps", "chol", "thalach", "oldpeak", "ca"];

/// The target column (diagnosis of heart disease, 0-4).
pub const TARGET: &str = "num";

/// Numeric column with missing entries, filled with the column median.
pub const MEDIAN_IMPUTED: &str = "ca";

/// Categorical column with missing entries, filled with the column mode.
pub const MODE_IMPUTED: &str = "thal";

/// All 14 columns in the order they appear in the raw UCI data file.
pub const ALL_COLUMNS: [&str; 14] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal", "num",
];

/// Verify that every required column is present in the DataFrame.
///
/// Returns [`PrepError::Schema`] listing every absent column, so a caller
/// sees the full problem in one error instead of one column at a time.
pub fn validate(df: &DataFrame) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = ALL_COLUMNS
        .iter()
        .filter(|name| !present.iter().any(|p| p.as_str() == **name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PrepError::Schema(missing))
    }
}
