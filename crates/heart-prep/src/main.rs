//! CLI entry point for the heart disease preprocessing pipeline.

use anyhow::Result;
use clap::Parser;
use heart_prep::provider::{CsvFileProvider, DataProvider, UciHeartProvider};
use heart_prep::Preprocessor;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Heart disease dataset preprocessing",
    long_about = "Fetches the UCI Heart Disease dataset (or reads a local CSV), imputes\n\
                  missing values, and produces a model-ready feature matrix and target\n\
                  vector.\n\n\
                  EXAMPLES:\n  \
                  # Fetch from the UCI repository and preprocess with scaling\n  \
                  heart-prep -o results/\n\n  \
                  # Preprocess a local copy without scaling numeric features\n  \
                  heart-prep -i heart.csv --no-scale\n\n  \
                  # Machine-readable summary\n  \
                  heart-prep --json | jq .feature_columns"
)]
struct Args {
    /// Path to a local CSV copy of the dataset (header row required)
    ///
    /// If not specified, the dataset is fetched from the UCI repository
    #[arg(short, long)]
    input: Option<String>,

    /// Output directory for the feature matrix and target vector
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Pass numeric features through unchanged instead of standardizing them
    #[arg(long)]
    no_scale: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output a JSON summary to stdout instead of human-readable text
    ///
    /// Disables all logging; only the JSON summary is written to stdout
    #[arg(long)]
    json: bool,
}

/// Summary of a pipeline run, printed at the end (as JSON with --json).
#[derive(Debug, Serialize)]
struct RunSummary {
    rows: usize,
    feature_columns: usize,
    scaled: bool,
    processing_steps: Vec<String>,
    features_path: String,
    target_path: String,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// stdout only contains the JSON summary.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.output).exists() {
        std::fs::create_dir_all(&args.output)?;
        info!("Created output directory: {}", args.output);
    }

    let provider: Box<dyn DataProvider> = match &args.input {
        Some(path) => Box::new(CsvFileProvider::new(path)),
        None => Box::new(UciHeartProvider::default()),
    };
    let data = provider.fetch()?;
    info!("Dataset ready: {:?}", data.shape());

    let scale = !args.no_scale;
    let result = Preprocessor::new(scale).run(&data)?;

    let features_path = Path::new(&args.output).join("features.csv");
    let target_path = Path::new(&args.output).join("target.csv");

    let mut features = result.features.clone();
    write_csv(&mut features, &features_path)?;

    let mut target_df = DataFrame::new(vec![result.target.clone().into()])?;
    write_csv(&mut target_df, &target_path)?;

    let summary = RunSummary {
        rows: result.features.height(),
        feature_columns: result.features.width(),
        scaled: scale,
        processing_steps: result.processing_steps,
        features_path: features_path.display().to_string(),
        target_path: target_path.display().to_string(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Preprocessing complete");
        println!("  Rows:            {}", summary.rows);
        println!("  Feature columns: {}", summary.feature_columns);
        println!("  Scaled:          {}", summary.scaled);
        println!("  Features:        {}", summary.features_path);
        println!("  Target:          {}", summary.target_path);
        for step in &summary.processing_steps {
            println!("  - {}", step);
        }
    }

    Ok(())
}
