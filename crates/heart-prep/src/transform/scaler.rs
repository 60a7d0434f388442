//! Numeric standardization: (x - mean) / std per column.

use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters learned for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    mean: f64,
    std: f64,
}

/// Standardizes numeric columns to zero mean and unit variance.
///
/// Parameters are stored in the order the columns were declared at fit time,
/// which fixes the column order of the transformed block. The standard
/// deviation uses ddof = 0; a zero deviation is guarded to 1.0 so constant
/// columns map to zero rather than dividing by zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    params: Vec<(String, ScalerParams)>,
    is_fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn mean and std for each listed column.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.params.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series().cast(&DataType::Float64)?;
            let ca = series.f64()?;

            let mean = ca
                .mean()
                .ok_or_else(|| PrepError::NoValidValues(col_name.to_string()))?;
            let std = ca.std(0).unwrap_or(1.0);
            let std = if std == 0.0 || !std.is_finite() { 1.0 } else { std };

            self.params
                .push((col_name.to_string(), ScalerParams { mean, std }));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Produce the block of standardized columns, in fit order.
    ///
    /// Null entries stay null; statistics were computed over observed values
    /// only, so a null here simply carries through to the output.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted("StandardScaler"));
        }

        let mut scaled_columns: Vec<Column> = Vec::with_capacity(self.params.len());
        for (col_name, params) in &self.params {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series().cast(&DataType::Float64)?;
            let ca = series.f64()?;

            let scaled: Float64Chunked = ca
                .into_iter()
                .map(|opt| opt.map(|v| (v - params.mean) / params.std))
                .collect();
            scaled_columns.push(
                scaled
                    .with_name(col_name.as_str().into())
                    .into_series()
                    .into(),
            );
        }

        Ok(DataFrame::new(scaled_columns)?)
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }
}
