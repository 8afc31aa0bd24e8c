//! Error types for NetCDF parsing operations.

use std::path::PathBuf;

use geojson_vectors::ConversionError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file could not be opened as NetCDF
    #[error("Failed to open NetCDF file {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Missing required variable or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl From<NetCdfError> for ConversionError {
    fn from(err: NetCdfError) -> Self {
        ConversionError::dataset(err.to_string())
    }
}
