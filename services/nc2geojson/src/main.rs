//! nc2geojson command line tool.
//!
//! Converts a single NetCDF file, or every `*.nc` file in a directory,
//! into GeoJSON point features.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use nc2geojson::{build_configuration, discover_inputs, run_batch, Overrides, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "nc2geojson")]
#[command(about = "Convert NetCDF vector fields to GeoJSON point features")]
#[command(group(ArgGroup::new("input").required(true).args(["input_file", "input_dir"])))]
struct Args {
    /// Dataset configuration file (JSON, or YAML by extension)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Convert every *.nc file in this directory
    #[arg(short = 'd', long)]
    input_dir: Option<PathBuf>,

    /// Convert a single NetCDF file
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// Maximum number of features to emit per file
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    max_records: Option<u64>,

    /// Directory for the generated GeoJSON files
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Longitudes are in [0, 360) and should be folded to [-180, 180)
    #[arg(long = "is360")]
    is_360: bool,

    /// Extra variable to copy into each feature (repeatable)
    #[arg(long = "extra-var")]
    extra_vars: Vec<String>,

    /// Skip features with missing values
    #[arg(long)]
    drop_missing: bool,

    /// Pretty-print the GeoJSON output
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "NC2GEOJSON_LOG_LEVEL")]
    log_level: String,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,
}

fn init_tracing(log_level: &str, log_format: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    match log_format {
        "json" => tracing::subscriber::set_global_default(builder.json().finish())?,
        "text" => tracing::subscriber::set_global_default(builder.finish())?,
        other => bail!("Unknown log format '{}', expected text or json", other),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, &args.log_format)?;

    netcdf_parser::silence_hdf5_errors();

    let config = build_configuration(
        args.config_file.as_deref(),
        Overrides {
            is_360: args.is_360,
            drop_missing: args.drop_missing,
            extra_vars: args.extra_vars,
        },
    )?;

    let inputs = match (&args.input_file, &args.input_dir) {
        (Some(file), _) => vec![file.clone()],
        (None, Some(dir)) => discover_inputs(dir)?,
        (None, None) => bail!("Either --input-file or --input-dir is required"),
    };

    let options = RunOptions {
        output_dir: args.output_dir,
        max_records: args.max_records.map(|n| n as usize),
        pretty: args.pretty,
    };

    info!(
        files = inputs.len(),
        output_dir = %options.output_dir.display(),
        "Starting conversion"
    );

    let report = run_batch(&inputs, &config, &options).into_result()?;
    for converted in &report.converted {
        println!("{}", converted.output.display());
    }
    Ok(())
}
