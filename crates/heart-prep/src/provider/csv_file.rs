//! Local CSV provider for offline runs and tests.

use super::DataProvider;
use crate::error::Result;
use polars::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Reads the raw table from a local CSV file with a header row.
///
/// Missing entries may be empty cells or `?`, matching the convention of the
/// raw UCI file.
pub struct CsvFileProvider {
    path: PathBuf,
}

static_assertions::assert_impl_all!(CsvFileProvider: Send, Sync);

impl CsvFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataProvider for CsvFileProvider {
    fn fetch(&self) -> Result<DataFrame> {
        info!("Loading dataset from {}", self.path.display());

        let parse_options = CsvParseOptions::default()
            .with_null_values(Some(NullValues::AllColumnsSingle("?".into())));

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(parse_options)
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;

        info!("Loaded dataset: {:?}", df.shape());
        Ok(df)
    }
}
