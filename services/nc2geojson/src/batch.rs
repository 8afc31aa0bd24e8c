//! Converting one file or a directory of files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use geojson_vectors::{convert, Configuration};
use netcdf_parser::NetCdfDataset;
use thiserror::Error;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::output::{output_path, write_collection};

/// Options shared by every file in a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub max_records: Option<usize>,
    pub pretty: bool,
}

/// Result of converting a single input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub input: PathBuf,
    pub output: PathBuf,
    pub features: usize,
}

/// Returned when at least one file in a batch failed.
#[derive(Debug, Error)]
#[error("{failed} of {total} files failed to convert")]
pub struct BatchFailed {
    pub failed: usize,
    pub total: usize,
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Converted>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    pub fn into_result(self) -> std::result::Result<Self, BatchFailed> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(BatchFailed {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// `*.nc` files directly inside `dir`, sorted by file name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to list {:?}", dir))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "nc") {
            inputs.push(path.to_path_buf());
        }
    }
    Ok(inputs)
}

/// Convert one NetCDF file and write `<output_dir>/<stem>.json`.
pub fn convert_file(input: &Path, config: &Configuration, options: &RunOptions) -> Result<Converted> {
    let start = Instant::now();

    let dataset = NetCdfDataset::open(input)?;
    let collection = convert(&dataset, config, options.max_records)
        .with_context(|| format!("Failed to convert {:?}", input))?;

    let output = output_path(&options.output_dir, input);
    write_collection(&output, &collection, options.pretty)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        features = collection.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Converted file"
    );

    Ok(Converted {
        input: input.to_path_buf(),
        output,
        features: collection.len(),
    })
}

/// Convert every input, logging and skipping files that fail.
pub fn run_batch(inputs: &[PathBuf], config: &Configuration, options: &RunOptions) -> BatchReport {
    if inputs.is_empty() {
        warn!("No input files to convert");
    }

    let mut report = BatchReport::default();
    for input in inputs {
        match convert_file(input, config, options) {
            Ok(converted) => report.converted.push(converted),
            Err(e) => {
                let message = format!("{:#}", e);
                error!(input = %input.display(), error = %message, "Conversion failed");
                report.failed.push((input.clone(), message));
            }
        }
    }

    info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        "Batch complete"
    );
    report
}
