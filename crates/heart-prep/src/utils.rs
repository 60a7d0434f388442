//! Shared Series helpers used across the imputers and transformers.

use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Render a single value as the string used for category vocabularies.
///
/// Strings render without the quotes Polars adds in its own formatting.
/// Whole-number floats render without a fractional part so an integer
/// column and its Float64 cast (imputation converts to Float64) produce
/// identical labels.
pub fn category_label(value: &AnyValue) -> String {
    match value {
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => float_label(*v),
        AnyValue::Float32(v) => float_label(*v as f64),
        other => format!("{}", other),
    }
}

fn float_label(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Calculate the mode (most frequent non-null value) of a Series.
///
/// Values are compared by their string rendering so the same routine covers
/// string columns and numerically coded categorical columns. Ties are broken
/// deterministically in favor of the value that occurs first in row order.
pub fn series_mode(series: &Series) -> Option<String> {
    let mut counts: Vec<(String, usize, usize)> = Vec::new(); // (value, count, first index)

    // Series::iter requires a single-chunk series
    let series = series.rechunk();
    for (idx, value) in series.iter().enumerate() {
        if matches!(value, AnyValue::Null) {
            continue;
        }
        let label = category_label(&value);
        match counts.iter_mut().find(|(v, _, _)| *v == label) {
            Some((_, count, _)) => *count += 1,
            None => counts.push((label, 1, idx)),
        }
    }

    counts
        .into_iter()
        .max_by(|(_, ca, ia), (_, cb, ib)| ca.cmp(cb).then(ib.cmp(ia)))
        .map(|(value, _, _)| value)
}

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let cast = series.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    let filled: Float64Chunked = ca
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(fill_value)))
        .collect();
    Ok(filled.with_name(series.name().clone()).into_series())
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let cast = series.cast(&DataType::String)?;
    let ca = cast.str()?;
    let filled: StringChunked = ca
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(fill_value).to_string()))
        .collect();
    Ok(filled.with_name(series.name().clone()).into_series())
}
