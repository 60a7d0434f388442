//! Statistical imputation methods.
//!
//! Provides median and mode imputation. Both operate on a mutable working
//! DataFrame owned by the pipeline; the caller's original input is never
//! touched.

use crate::error::{PrepError, Result};
use crate::utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, series_mode};
use polars::prelude::*;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill nulls in a numeric column with the median of its observed values.
    pub fn apply_numeric_median(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let series = df
            .column(col_name)
            .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?
            .as_materialized_series()
            .clone();

        if series.null_count() == 0 {
            return Ok(());
        }

        let median_val = series
            .median()
            .ok_or_else(|| PrepError::NoValidValues(col_name.to_string()))?;

        let filled = fill_numeric_nulls(&series, median_val)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled '{}' with median: {:.2}",
            col_name, median_val
        ));

        Ok(())
    }

    /// Fill nulls in a categorical column with its most frequent value.
    ///
    /// Ties between equally frequent values go to the one occurring first in
    /// row order. Works for string columns and numerically coded categorical
    /// columns alike.
    pub fn apply_mode_imputation(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let series = df
            .column(col_name)
            .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?
            .as_materialized_series()
            .clone();

        if series.null_count() == 0 {
            return Ok(());
        }

        let mode_val = series_mode(&series)
            .ok_or_else(|| PrepError::NoValidValues(col_name.to_string()))?;

        let filled = if is_numeric_dtype(series.dtype()) {
            let numeric_mode = mode_val.parse::<f64>().map_err(|_| {
                PrepError::ImputationFailed {
                    column: col_name.to_string(),
                    reason: format!("mode '{}' is not numeric", mode_val),
                }
            })?;
            fill_numeric_nulls(&series, numeric_mode)?
        } else {
            fill_string_nulls(&series, &mode_val)?
        };
        df.replace(col_name, filled)?;

        processing_steps.push(format!("Filled '{}' with mode: '{}'", col_name, mode_val));

        Ok(())
    }
}
