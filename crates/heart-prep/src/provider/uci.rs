//! UCI repository provider.
//!
//! Fetches the processed Cleveland data file from the UCI Machine Learning
//! Repository. The file is headerless, comma-separated, and marks missing
//! entries with `?`.

use super::DataProvider;
use crate::error::{PrepError, Result};
use crate::schema::ALL_COLUMNS;
use polars::prelude::*;
use reqwest::blocking::Client;
use std::io::Cursor;
use std::time::Duration;
use tracing::info;

/// Default location of the processed Cleveland data file.
const DEFAULT_BASE_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/heart-disease/processed.cleveland.data";

/// Default timeout for the fetch request in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the UCI provider.
#[derive(Debug, Clone)]
pub struct UciHeartConfig {
    /// URL of the data file (useful for mirrors or local HTTP fixtures).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UciHeartConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Fetches the heart disease dataset from the UCI repository.
pub struct UciHeartProvider {
    client: Client,
    config: UciHeartConfig,
}

static_assertions::assert_impl_all!(UciHeartProvider: Send, Sync);

impl UciHeartProvider {
    pub fn new(config: UciHeartConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Parse the raw file body into a named DataFrame.
    fn parse_body(body: Vec<u8>) -> Result<DataFrame> {
        let parse_options = CsvParseOptions::default()
            .with_null_values(Some(NullValues::AllColumnsSingle("?".into())));

        let mut df = CsvReadOptions::default()
            .with_has_header(false)
            .with_parse_options(parse_options)
            .into_reader_with_file_handle(Cursor::new(body))
            .finish()?;

        if df.width() != ALL_COLUMNS.len() {
            return Err(PrepError::FetchFailed(format!(
                "expected {} columns in the data file, got {}",
                ALL_COLUMNS.len(),
                df.width()
            )));
        }
        df.set_column_names(ALL_COLUMNS)?;

        Ok(df)
    }
}

impl Default for UciHeartProvider {
    fn default() -> Self {
        // Building a client with default config cannot fail in practice;
        // fall back to a plain client if it somehow does.
        Self::new(UciHeartConfig::default()).unwrap_or_else(|_| Self {
            client: Client::new(),
            config: UciHeartConfig::default(),
        })
    }
}

impl DataProvider for UciHeartProvider {
    fn fetch(&self) -> Result<DataFrame> {
        info!("Fetching heart disease data from {}", self.config.base_url);

        let response = self.client.get(&self.config.base_url).send()?;
        if !response.status().is_success() {
            return Err(PrepError::FetchFailed(format!(
                "UCI repository returned status {}",
                response.status()
            )));
        }
        let body = response.bytes()?.to_vec();

        let df = Self::parse_body(body)?;
        info!("Fetched dataset: {:?}", df.shape());
        Ok(df)
    }
}
