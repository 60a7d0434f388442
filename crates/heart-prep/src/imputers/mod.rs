//! Imputation module for handling missing values.
//!
//! The pipeline uses two statistical strategies: median for the designated
//! numeric column and mode for the designated categorical column.

mod statistical;

pub use statistical::StatisticalImputer;
