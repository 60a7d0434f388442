//! Heart Disease Preprocessing Pipeline
//!
//! Fetches the UCI Heart Disease dataset (Cleveland subset) and applies a
//! fixed tabular preprocessing pipeline built on Polars, producing a
//! model-ready feature matrix and target vector.
//!
//! # Overview
//!
//! The pipeline runs four steps over a raw 14-column table:
//!
//! - **Schema check**: all 14 known column names must be present
//! - **Imputation**: `ca` filled with its median, `thal` with its mode
//! - **Split**: `num` becomes the target vector
//! - **Transform**: numeric columns standardized and categorical columns
//!   one-hot encoded (scale mode), or one-hot only with numeric passthrough
//!   (no-scale mode)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use heart_prep::provider::{DataProvider, UciHeartProvider};
//! use heart_prep::preprocess;
//!
//! let df = UciHeartProvider::default().fetch()?;
//! let (features, target) = preprocess(&df, true)?;
//!
//! assert_eq!(features.height(), target.len());
//! ```
//!
//! Fit and transform happen in one combined pass over the same table. This
//! is deliberate one-shot dataset preparation: callers needing train/test
//! isolation must fit [`transform::StandardScaler`] and
//! [`transform::OneHotEncoder`] on training rows only and reuse the fitted
//! parameters on the test rows.

pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod provider;
pub mod schema;
pub mod transform;
pub mod utils;

// Re-exports for convenient access
pub use error::{PrepError, Result as PrepResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use pipeline::{preprocess, PreprocessResult, Preprocessor};
pub use provider::{CsvFileProvider, DataProvider, UciHeartConfig, UciHeartProvider};
pub use transform::{OneHotEncoder, StandardScaler};
