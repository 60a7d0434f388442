//! The preprocessing pipeline.
//!
//! Orchestrates the full sequence: schema check, imputation on a working
//! copy, target split, and the scale/no-scale transformation branch. One
//! call produces the model-ready feature matrix and target vector.

use crate::error::{Result, ResultExt};
use crate::imputers::StatisticalImputer;
use crate::schema::{self, CATEGORICAL_FEATURES, MEDIAN_IMPUTED, MODE_IMPUTED, NUMERIC_FEATURES, TARGET};
use crate::transform::{OneHotEncoder, StandardScaler};
use polars::prelude::*;
use tracing::{debug, info};

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    /// Numeric feature matrix, one Float64 column per transformed feature.
    pub features: DataFrame,
    /// Target vector, original values, row-aligned with `features`.
    pub target: Series,
    /// Human-readable record of the imputation and transform steps applied.
    pub processing_steps: Vec<String>,
}

/// Preprocessor for the heart disease dataset.
///
/// # Example
///
/// ```rust,ignore
/// use heart_prep::{Preprocessor, provider::{DataProvider, UciHeartProvider}};
///
/// let df = UciHeartProvider::default().fetch()?;
/// let result = Preprocessor::new(true).run(&df)?;
/// println!("{} rows, {} feature columns", result.features.height(), result.features.width());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Preprocessor {
    scale: bool,
}

static_assertions::assert_impl_all!(Preprocessor: Send, Sync);

impl Preprocessor {
    /// Create a preprocessor. `scale` selects whether numeric features are
    /// standardized or passed through unchanged.
    pub fn new(scale: bool) -> Self {
        Self { scale }
    }

    /// Run the pipeline over a raw table.
    ///
    /// The input is never mutated; imputation happens on a working copy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PrepError::Schema`] when any of the 14 required
    /// columns is absent. Errors from the imputation or transform steps
    /// propagate unmodified.
    pub fn run(&self, df: &DataFrame) -> Result<PreprocessResult> {
        info!(
            "Starting preprocessing: {} rows, {} columns, scale={}",
            df.height(),
            df.width(),
            self.scale
        );

        schema::validate(df)?;

        let mut processing_steps: Vec<String> = Vec::new();

        // Step 1: impute on a working copy, never the caller's input
        let mut working = df.clone();
        StatisticalImputer::apply_numeric_median(&mut working, MEDIAN_IMPUTED, &mut processing_steps)
            .context(format!("While imputing '{}'", MEDIAN_IMPUTED))?;
        StatisticalImputer::apply_mode_imputation(&mut working, MODE_IMPUTED, &mut processing_steps)
            .context(format!("While imputing '{}'", MODE_IMPUTED))?;

        // Step 2: split off the target
        let target = working
            .column(TARGET)?
            .as_materialized_series()
            .clone();
        let features = working.drop(TARGET)?;

        // Step 3 + 4: fixed column grouping, then the transform branch
        let matrix = if self.scale {
            self.transform_scaled(&features, &mut processing_steps)?
        } else {
            self.transform_passthrough(&features, &mut processing_steps)?
        };

        debug_assert_eq!(matrix.height(), df.height());
        debug_assert_eq!(target.len(), df.height());

        for step in &processing_steps {
            debug!("{}", step);
        }
        info!(
            "Preprocessing complete: feature matrix {} x {}",
            matrix.height(),
            matrix.width()
        );

        Ok(PreprocessResult {
            features: matrix,
            target,
            processing_steps,
        })
    }

    /// Scale mode: standardized numeric block, then one-hot block.
    fn transform_scaled(
        &self,
        features: &DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        let mut scaler = StandardScaler::new();
        let numeric_block = scaler
            .fit_transform(features, &NUMERIC_FEATURES)
            .context("While standardizing numeric features")?;
        processing_steps.push(format!(
            "Standardized {} numeric columns",
            numeric_block.width()
        ));

        let mut encoder = OneHotEncoder::new();
        let categorical_block = encoder
            .fit_transform(features, &CATEGORICAL_FEATURES)
            .context("While one-hot encoding categorical features")?;
        processing_steps.push(format!(
            "One-hot encoded {} categorical columns into {} indicators",
            CATEGORICAL_FEATURES.len(),
            categorical_block.width()
        ));

        Ok(numeric_block.hstack(categorical_block.get_columns())?)
    }

    /// No-scale mode: one-hot block first, remainder passed through after it
    /// in its original relative order.
    fn transform_passthrough(
        &self,
        features: &DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        let mut encoder = OneHotEncoder::new();
        let categorical_block = encoder
            .fit_transform(features, &CATEGORICAL_FEATURES)
            .context("While one-hot encoding categorical features")?;
        processing_steps.push(format!(
            "One-hot encoded {} categorical columns into {} indicators",
            CATEGORICAL_FEATURES.len(),
            categorical_block.width()
        ));

        let mut remainder: Vec<Column> = Vec::new();
        for column in features.get_columns() {
            let name = column.name().as_str();
            if CATEGORICAL_FEATURES.contains(&name) {
                continue;
            }
            let passthrough = column.as_materialized_series().cast(&DataType::Float64)?;
            remainder.push(passthrough.into());
        }
        processing_steps.push(format!(
            "Passed {} remainder columns through unchanged",
            remainder.len()
        ));

        Ok(categorical_block.hstack(&remainder)?)
    }
}

/// Preprocess a raw table into a feature matrix and target vector.
///
/// Convenience wrapper over [`Preprocessor`] for callers that do not need
/// the processing-step record.
pub fn preprocess(df: &DataFrame, scale: bool) -> Result<(DataFrame, Series)> {
    let result = Preprocessor::new(scale).run(df)?;
    Ok((result.features, result.target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use crate::schema::ALL_COLUMNS;

    /// Small table covering all 14 schema columns, with nulls in the two
    /// imputed columns.
    fn sample_df() -> DataFrame {
        df![
            "age" => [63.0, 41.0, 57.0, 52.0],
            "sex" => [1.0, 0.0, 1.0, 0.0],
            "cp" => [1.0, 2.0, 4.0, 2.0],
            "trestbps" => [145.0, 130.0, 120.0, 138.0],
            "chol" => [233.0, 204.0, 354.0, 210.0],
            "fbs" => [1.0, 0.0, 0.0, 0.0],
            "restecg" => [2.0, 2.0, 0.0, 1.0],
            "thalach" => [150.0, 172.0, 163.0, 160.0],
            "exang" => [0.0, 0.0, 1.0, 0.0],
            "oldpeak" => [2.3, 1.4, 0.6, 1.0],
            "slope" => [3.0, 1.0, 1.0, 2.0],
            "ca" => [Some(0.0), None, Some(1.0), Some(0.0)],
            "thal" => [Some(6.0), Some(3.0), Some(3.0), None],
            "num" => [0.0, 0.0, 1.0, 0.0],
        ]
        .unwrap()
    }

    #[test]
    fn test_row_count_invariant() {
        let df = sample_df();
        for scale in [true, false] {
            let (features, target) = preprocess(&df, scale).unwrap();
            assert_eq!(features.height(), df.height());
            assert_eq!(target.len(), df.height());
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let df = sample_df();
        let ca_nulls_before = df.column("ca").unwrap().null_count();
        let thal_nulls_before = df.column("thal").unwrap().null_count();

        preprocess(&df, true).unwrap();

        assert_eq!(df.column("ca").unwrap().null_count(), ca_nulls_before);
        assert_eq!(df.column("thal").unwrap().null_count(), thal_nulls_before);
    }

    #[test]
    fn test_target_is_untransformed() {
        let df = sample_df();
        let (_, target) = preprocess(&df, true).unwrap();
        let ca = target.f64().unwrap();
        assert_eq!(ca.get(2), Some(1.0));
        assert_eq!(ca.get(0), Some(0.0));
    }

    #[test]
    fn test_scale_mode_output_width() {
        let df = sample_df();
        let (features, _) = preprocess(&df, true).unwrap();

        // Distinct categories: sex 2, cp 3, fbs 2, restecg 3, exang 2,
        // slope 3, thal 2 (the null was imputed to the mode) = 17 indicators
        assert_eq!(features.width(), NUMERIC_FEATURES.len() + 17);
    }

    #[test]
    fn test_scale_mode_numeric_block_comes_first() {
        let df = sample_df();
        let (features, _) = preprocess(&df, true).unwrap();

        let names: Vec<String> = features
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(&names[..NUMERIC_FEATURES.len()], &NUMERIC_FEATURES[..]);
        assert!(names[NUMERIC_FEATURES.len()].starts_with("sex_"));
    }

    #[test]
    fn test_no_scale_mode_passes_numeric_through() {
        let df = sample_df();
        let (features, _) = preprocess(&df, false).unwrap();

        let age = features.column("age").unwrap().as_materialized_series().f64().unwrap().clone();
        assert_eq!(age.get(0), Some(63.0));
        assert_eq!(age.get(1), Some(41.0));

        // Remainder comes after the one-hot block
        let names: Vec<String> = features
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let age_pos = names.iter().position(|n| n == "age").unwrap();
        assert!(names[..age_pos].iter().all(|n| n.contains('_')));
    }

    #[test]
    fn test_no_scale_remainder_keeps_relative_order() {
        let df = sample_df();
        let (features, _) = preprocess(&df, false).unwrap();

        let names: Vec<String> = features
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tail: Vec<&String> = names.iter().rev().take(6).rev().collect();
        assert_eq!(
            tail,
            vec!["age", "trestbps", "chol", "thalach", "oldpeak", "ca"]
        );
    }

    #[test]
    fn test_imputed_values_feed_the_transform() {
        let df = sample_df();
        let (features, _) = preprocess(&df, false).unwrap();

        // ca had one null; median of [0, 1, 0] = 0, so no nulls remain
        assert_eq!(features.column("ca").unwrap().null_count(), 0);
    }

    #[test]
    fn test_missing_column_raises_schema_error() {
        let df = sample_df().drop("oldpeak").unwrap();
        let err = preprocess(&df, true).unwrap_err();
        assert!(matches!(err, PrepError::Schema(ref missing) if missing == &vec!["oldpeak".to_string()]));
    }

    #[test]
    fn test_schema_error_reported_before_any_work() {
        // All columns missing except one; the error should name the other 13
        let df = df![
            "age" => [1.0],
        ]
        .unwrap();
        let err = preprocess(&df, true).unwrap_err();
        match err {
            PrepError::Schema(missing) => assert_eq!(missing.len(), ALL_COLUMNS.len() - 1),
            other => panic!("expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_processing_steps_recorded() {
        let df = sample_df();
        let result = Preprocessor::new(true).run(&df).unwrap();
        assert!(result
            .processing_steps
            .iter()
            .any(|s| s.contains("median")));
        assert!(result.processing_steps.iter().any(|s| s.contains("mode")));
        assert!(result
            .processing_steps
            .iter()
            .any(|s| s.contains("Standardized")));
    }
}
