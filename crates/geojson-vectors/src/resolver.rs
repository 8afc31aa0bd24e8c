//! Locating and validating the variables a conversion needs.
//!
//! Resolution either succeeds completely or fails before any feature is
//! built: every configured variable is checked for existence and shape
//! before anything is read.

use tracing::debug;

use crate::config::{Configuration, VariableRef};
use crate::dataset::{squeeze_leading, Dataset, Variable};
use crate::error::{ConversionError, Result};
use crate::grid::{GridIndex, GridShape};
use crate::vector::VectorSample;

const GRID_RANK: usize = 2;

/// Latitude/longitude arrays and how they map onto the grid.
#[derive(Debug, Clone)]
pub enum Coordinates {
    /// 1-D axes: latitude varies by row, longitude by column.
    Regular { lat: Variable, lon: Variable },
    /// 2-D arrays with one value per grid cell.
    Curvilinear { lat: Variable, lon: Variable },
}

/// The vector variables that are the source of truth for a run.
#[derive(Debug, Clone)]
pub enum VectorSource {
    Cartesian { u: Variable, v: Variable },
    Polar { magnitude: Variable, direction: Variable },
}

/// Everything needed to build features, validated against one grid shape.
#[derive(Debug, Clone)]
pub struct ResolvedVariables {
    shape: GridShape,
    coordinates: Coordinates,
    vector: VectorSource,
    derive: bool,
    extras: Vec<Variable>,
}

impl ResolvedVariables {
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn vector_source(&self) -> &VectorSource {
        &self.vector
    }

    /// Whether the non-authoritative representation is computed and emitted.
    pub fn derives_other_representation(&self) -> bool {
        self.derive
    }

    pub fn extras(&self) -> &[Variable] {
        &self.extras
    }

    /// Raw (longitude, latitude) of a cell, before normalization.
    pub fn position(&self, index: GridIndex) -> (f64, f64) {
        match &self.coordinates {
            Coordinates::Regular { lat, lon } => (lon.at(index.col), lat.at(index.row)),
            Coordinates::Curvilinear { lat, lon } => {
                let offset = index.offset(self.shape);
                (lon.at(offset), lat.at(offset))
            }
        }
    }

    /// The stored vector at a cell.
    pub fn vector_at(&self, index: GridIndex) -> VectorSample {
        let offset = index.offset(self.shape);
        match &self.vector {
            VectorSource::Cartesian { u, v } => VectorSample::Cartesian {
                u: u.at(offset),
                v: v.at(offset),
            },
            VectorSource::Polar {
                magnitude,
                direction,
            } => VectorSample::Polar {
                magnitude: magnitude.at(offset),
                direction: direction.at(offset),
            },
        }
    }

    /// Extra variable values at a cell, in configured order.
    pub fn extras_at(&self, index: GridIndex) -> impl Iterator<Item = (&str, f64)> + '_ {
        let offset = index.offset(self.shape);
        self.extras.iter().map(move |var| (var.name(), var.at(offset)))
    }
}

/// Which pair of vector variables to read.
#[derive(Clone, Copy)]
enum Representation<'a> {
    Cartesian(&'a VariableRef, &'a VariableRef),
    Polar(&'a VariableRef, &'a VariableRef),
}

/// Resolve and load every variable named by `config`.
pub fn resolve<D: Dataset + ?Sized>(dataset: &D, config: &Configuration) -> Result<ResolvedVariables> {
    if config.convert_uv && config.convert_mag_dir {
        return Err(ConversionError::ConflictingFlags);
    }

    let lat_shape = require(dataset, &config.lat)?;
    let lon_shape = require(dataset, &config.lon)?;
    let (shape, regular) = grid_shape(config, &lat_shape, &lon_shape)?;
    debug!(
        rows = shape.rows,
        cols = shape.cols,
        regular,
        "Resolved coordinate grid"
    );

    let representation = choose_representation(dataset, config)?;
    let (first, second) = match representation {
        Representation::Cartesian(u, v) => (u, v),
        Representation::Polar(magnitude, direction) => (magnitude, direction),
    };
    let axes = if regular { axis_dimensions(dataset, config) } else { None };

    for var in [first, second] {
        let var_shape = require(dataset, var)?;
        check_grid_shape(&var.name, shape, &var_shape)?;
        check_dimension_order(dataset, &var.name, axes.as_ref())?;
    }

    for name in &config.extra_vars {
        let var_shape = require(dataset, &VariableRef::new("extraVars", name.clone()))?;
        check_grid_shape(name, shape, &var_shape)?;
        check_dimension_order(dataset, name, axes.as_ref())?;
    }

    // Validation is complete; only reads can fail from here on.
    let lat = dataset.variable(&config.lat.name)?;
    let lon = dataset.variable(&config.lon.name)?;
    let coordinates = if regular {
        Coordinates::Regular { lat, lon }
    } else {
        Coordinates::Curvilinear { lat, lon }
    };

    let (vector, derive) = match representation {
        Representation::Cartesian(u, v) => (
            VectorSource::Cartesian {
                u: dataset.variable(&u.name)?,
                v: dataset.variable(&v.name)?,
            },
            config.convert_uv,
        ),
        Representation::Polar(magnitude, direction) => (
            VectorSource::Polar {
                magnitude: dataset.variable(&magnitude.name)?,
                direction: dataset.variable(&direction.name)?,
            },
            config.convert_mag_dir,
        ),
    };

    let extras = config
        .extra_vars
        .iter()
        .map(|name| dataset.variable(name))
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedVariables {
        shape,
        coordinates,
        vector,
        derive,
        extras,
    })
}

/// Shape of a configured variable, or a MissingVariable error.
fn require<D: Dataset + ?Sized>(dataset: &D, var: &VariableRef) -> Result<Vec<usize>> {
    dataset.shape(&var.name).ok_or_else(|| {
        debug!(
            option = var.option,
            variable = %var.name,
            available = ?dataset.variable_names(),
            "Configured variable not found"
        );
        ConversionError::missing(var.option, var.name.clone())
    })
}

/// Dimension names of the 1-D latitude and longitude axes, when known.
fn axis_dimensions<D: Dataset + ?Sized>(dataset: &D, config: &Configuration) -> Option<[String; 2]> {
    let lat = dataset.dimensions(&config.lat.name)?.pop()?;
    let lon = dataset.dimensions(&config.lon.name)?.pop()?;
    Some([lat, lon])
}

/// Reject a variable whose last two dimensions are not `[lat, lon]`.
///
/// Only checked when both the axes and the variable carry dimension names.
fn check_dimension_order<D: Dataset + ?Sized>(
    dataset: &D,
    name: &str,
    axes: Option<&[String; 2]>,
) -> Result<()> {
    let (Some(axes), Some(dims)) = (axes, dataset.dimensions(name)) else {
        return Ok(());
    };
    if dims.len() >= 2 && dims[dims.len() - 2..] == axes[..] {
        Ok(())
    } else {
        Err(ConversionError::DimensionOrder {
            name: name.to_string(),
            expected: axes.to_vec(),
            actual: dims,
        })
    }
}

/// Derive the grid from the coordinate shapes; the flag is true for 1-D axes.
fn grid_shape(config: &Configuration, lat_shape: &[usize], lon_shape: &[usize]) -> Result<(GridShape, bool)> {
    let lat_dims = squeeze_leading(lat_shape, GRID_RANK);
    let lon_dims = squeeze_leading(lon_shape, GRID_RANK);

    match (lat_dims, lon_dims) {
        ([rows], [cols]) => Ok((GridShape::new(*rows, *cols), true)),
        ([rows, cols], [lon_rows, lon_cols]) if rows == lon_rows && cols == lon_cols => {
            Ok((GridShape::new(*rows, *cols), false))
        }
        ([_, _], _) => Err(ConversionError::shape_mismatch(
            config.lon.name.clone(),
            lat_dims,
            lon_dims,
        )),
        _ => Err(ConversionError::shape_mismatch(
            config.lat.name.clone(),
            lon_dims,
            lat_dims,
        )),
    }
}

fn check_grid_shape(name: &str, grid: GridShape, shape: &[usize]) -> Result<()> {
    if squeeze_leading(shape, GRID_RANK) == grid.dims() {
        Ok(())
    } else {
        Err(ConversionError::shape_mismatch(name, &grid.dims(), shape))
    }
}

fn pair_present<'a, D: Dataset + ?Sized>(
    dataset: &D,
    first: &'a Option<VariableRef>,
    second: &'a Option<VariableRef>,
) -> Option<(&'a VariableRef, &'a VariableRef)> {
    match (first, second) {
        (Some(a), Some(b)) if dataset.contains(&a.name) && dataset.contains(&b.name) => Some((a, b)),
        _ => None,
    }
}

fn choose_representation<'a, D: Dataset + ?Sized>(
    dataset: &D,
    config: &'a Configuration,
) -> Result<Representation<'a>> {
    if config.convert_uv {
        let (u, v) = configured_pair(&config.u, &config.v, "convertUV", "uVar and vVar")?;
        debug!(u = %u.name, v = %v.name, "Deriving magnitude/direction from u/v");
        return Ok(Representation::Cartesian(u, v));
    }

    if config.convert_mag_dir {
        let (magnitude, direction) = configured_pair(
            &config.magnitude,
            &config.direction,
            "convertMagDir",
            "magnitudeVar and directionVar",
        )?;
        debug!(
            magnitude = %magnitude.name,
            direction = %direction.name,
            "Deriving u/v from magnitude/direction"
        );
        return Ok(Representation::Polar(magnitude, direction));
    }

    if let Some((u, v)) = pair_present(dataset, &config.u, &config.v) {
        debug!(u = %u.name, v = %v.name, "Passing u/v through unconverted");
        return Ok(Representation::Cartesian(u, v));
    }

    if let Some((magnitude, direction)) = pair_present(dataset, &config.magnitude, &config.direction) {
        debug!(
            magnitude = %magnitude.name,
            direction = %direction.name,
            "Passing magnitude/direction through unconverted"
        );
        return Ok(Representation::Polar(magnitude, direction));
    }

    Err(ConversionError::NoVectorRepresentation)
}

fn configured_pair<'a>(
    first: &'a Option<VariableRef>,
    second: &'a Option<VariableRef>,
    flag: &str,
    needs: &str,
) -> Result<(&'a VariableRef, &'a VariableRef)> {
    match (first, second) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ConversionError::InvalidConfig(format!("{} requires {}", flag, needs))),
    }
}
