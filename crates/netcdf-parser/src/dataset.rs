//! [`Dataset`] implementation backed by a NetCDF file.

use std::path::{Path, PathBuf};

use geojson_vectors::{ConversionError, Dataset, Variable};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::hdf5::silence_hdf5_errors;

/// CF packing attributes of one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packing {
    pub scale_factor: f64,
    pub add_offset: f64,
    pub fill_value: Option<f64>,
    pub missing_value: Option<f64>,
}

impl Default for Packing {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            add_offset: 0.0,
            fill_value: None,
            missing_value: None,
        }
    }
}

impl Packing {
    fn from_variable(var: &netcdf::Variable) -> Self {
        Self {
            scale_factor: get_f64_attr(var, "scale_factor").unwrap_or(1.0),
            add_offset: get_f64_attr(var, "add_offset").unwrap_or(0.0),
            fill_value: get_f64_attr(var, "_FillValue"),
            missing_value: get_f64_attr(var, "missing_value"),
        }
    }

    /// Turn a stored value into a physical value; fill/missing become NaN.
    pub fn unpack(&self, raw: f64) -> f64 {
        if Some(raw) == self.fill_value || Some(raw) == self.missing_value {
            f64::NAN
        } else {
            raw * self.scale_factor + self.add_offset
        }
    }
}

/// An opened NetCDF file.
///
/// Variables are read in full on request; the file stays open until the
/// dataset is dropped.
pub struct NetCdfDataset {
    path: PathBuf,
    file: netcdf::File,
}

impl std::fmt::Debug for NetCdfDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetCdfDataset").field("path", &self.path).finish()
    }
}

impl NetCdfDataset {
    /// Open a NetCDF file for reading.
    ///
    /// A path that cannot be accessed fails with [`NetCdfError::IoError`]; a
    /// readable file that is not NetCDF fails with [`NetCdfError::OpenFailed`].
    pub fn open<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        // Silence HDF5's verbose stderr output for missing attributes
        silence_hdf5_errors();

        let path = path.as_ref();
        std::fs::metadata(path)?;
        let file = netcdf::open(path).map_err(|e| NetCdfError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Opened NetCDF dataset");

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a variable as unpacked `f64` values.
    ///
    /// `scale_factor` and `add_offset` are applied; `_FillValue` and
    /// `missing_value` entries become NaN.
    pub fn read_variable(&self, name: &str) -> NetCdfResult<Variable> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let raw: Vec<f64> = var
            .get_values::<f64, _>(..)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))?;

        let packing = Packing::from_variable(&var);
        if packing != Packing::default() {
            debug!(variable = name, ?packing, "Unpacking variable");
        }
        let data = raw.into_iter().map(|v| packing.unpack(v)).collect();

        Variable::new(name, shape, data).map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
    }
}

impl Dataset for NetCdfDataset {
    fn shape(&self, name: &str) -> Option<Vec<usize>> {
        self.file
            .variable(name)
            .map(|var| var.dimensions().iter().map(|d| d.len()).collect())
    }

    fn variable(&self, name: &str) -> Result<Variable, ConversionError> {
        Ok(self.read_variable(name)?)
    }

    fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|var| var.name()).collect()
    }

    fn dimensions(&self, name: &str) -> Option<Vec<String>> {
        self.file
            .variable(name)
            .map(|var| var.dimensions().iter().map(|d| d.name()).collect())
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_default_is_identity() {
        let packing = Packing::default();
        assert_eq!(packing.unpack(12.5), 12.5);
    }

    #[test]
    fn test_unpack_scale_offset_and_fill() {
        let packing = Packing {
            scale_factor: 0.1,
            add_offset: 5.0,
            fill_value: Some(-999.0),
            missing_value: Some(32767.0),
        };
        assert!((packing.unpack(10.0) - 6.0).abs() < 1e-12);
        assert!(packing.unpack(-999.0).is_nan());
        assert!(packing.unpack(32767.0).is_nan());
    }

    #[test]
    fn test_open_missing_file() {
        let err = NetCdfDataset::open("/nonexistent/definitely_missing.nc").unwrap_err();
        assert!(matches!(err, NetCdfError::IoError(_)));
    }
}
