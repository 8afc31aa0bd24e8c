//! NetCDF adapter for the geojson-vectors conversion engine.
//!
//! [`NetCdfDataset`] opens a CF-compliant NetCDF file with the native
//! `netcdf` library (which wraps HDF5) and serves its variables through the
//! [`geojson_vectors::Dataset`] trait. Every numeric variable is read as
//! `f64`, with CF packing (`scale_factor`, `add_offset`) applied and fill or
//! missing values turned into NaN.
//!
//! # Example
//!
//! ```ignore
//! use geojson_vectors::{convert, Configuration};
//! use netcdf_parser::NetCdfDataset;
//!
//! let dataset = NetCdfDataset::open("currents.nc")?;
//! let collection = convert(&dataset, &Configuration::default(), None)?;
//! ```

pub mod dataset;
pub mod error;
pub mod hdf5;

pub use dataset::{NetCdfDataset, Packing};
pub use error::{NetCdfError, NetCdfResult};
pub use hdf5::silence_hdf5_errors;
