//! NetCDF to GeoJSON conversion service.
//!
//! Reads CF-compliant NetCDF files holding vector fields (currents, winds,
//! waves) and writes one GeoJSON `FeatureCollection` of points per file.

pub mod batch;
pub mod config;
pub mod output;

pub use batch::{convert_file, discover_inputs, run_batch, BatchFailed, BatchReport, Converted, RunOptions};
pub use config::{build_configuration, load_config_file, Overrides};
pub use output::{output_path, write_collection};
