//! Data providers for the raw heart disease table.
//!
//! The [`DataProvider`] trait is the seam between the pipeline and wherever
//! the data actually comes from: the UCI repository over HTTP, or a local
//! CSV file for offline runs and tests.

mod csv_file;
mod uci;

use crate::error::Result;
use polars::prelude::DataFrame;

pub use csv_file::CsvFileProvider;
pub use uci::{UciHeartConfig, UciHeartProvider};

/// Source of a raw dataset snapshot.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a provider can be shared across
/// threads.
pub trait DataProvider: Send + Sync {
    /// Retrieve the raw table. Must contain the 14 schema columns; the
    /// pipeline re-validates this before doing any work.
    fn fetch(&self) -> Result<DataFrame>;
}
