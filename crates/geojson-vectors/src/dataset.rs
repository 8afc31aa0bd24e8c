//! Dataset abstraction.
//!
//! The conversion engine only needs named numeric arrays and their shapes.
//! [`Dataset`] is the seam where a concrete array library plugs in; the
//! NetCDF adapter lives in the `netcdf-parser` crate and [`MemoryDataset`]
//! covers arrays that are already in memory.

use crate::error::{ConversionError, Result};

/// Read-only access to the named variables of an opened dataset.
///
/// The dataset is owned by the caller; the engine borrows it for the length
/// of one conversion.
///
/// Gridded variables must be laid out `[.., lat, lon]`: the last two
/// dimensions are rows (latitude) then columns (longitude). Implementations
/// that know dimension names report them through [`Dataset::dimensions`] so
/// a transposed variable is rejected instead of read sideways.
pub trait Dataset {
    /// Shape of a variable, or `None` if the dataset has no such variable.
    fn shape(&self, name: &str) -> Option<Vec<usize>>;

    /// Read a whole variable as `f64` values in row-major order.
    ///
    /// Missing values must be returned as NaN.
    fn variable(&self, name: &str) -> Result<Variable>;

    /// Names of all variables in the dataset.
    fn variable_names(&self) -> Vec<String>;

    /// Dimension names of a variable, outermost first.
    ///
    /// `None` when the variable is absent or the dataset has no names.
    fn dimensions(&self, _name: &str) -> Option<Vec<String>> {
        None
    }

    fn contains(&self, name: &str) -> bool {
        self.shape(name).is_some()
    }
}

/// A fully loaded numeric variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Variable {
    /// Create a variable, checking that `data` fills `shape` exactly.
    pub fn new(name: impl Into<String>, shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let name = name.into();
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(ConversionError::dataset(format!(
                "variable '{}' declares shape {:?} ({} values) but holds {}",
                name,
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { name, shape, data })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Value at a row-major flat offset.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is out of range.
    pub fn at(&self, offset: usize) -> f64 {
        self.data[offset]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Shape with leading length-1 dimensions dropped until at most `rank` remain.
///
/// A `[time=1, y, x]` variable lines up with a `[y, x]` grid.
pub fn squeeze_leading(shape: &[usize], rank: usize) -> &[usize] {
    let mut start = 0;
    while shape.len() - start > rank && shape[start] == 1 {
        start += 1;
    }
    &shape[start..]
}

/// In-memory dataset, keyed by variable name in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    variables: Vec<Variable>,
    dimensions: Vec<(String, Vec<String>)>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any existing variable with the same name.
    pub fn insert(&mut self, variable: Variable) {
        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }

    /// Builder-style [`MemoryDataset::insert`].
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.insert(variable);
        self
    }

    /// Attach dimension names to a variable.
    pub fn with_dimensions(mut self, name: &str, dims: &[&str]) -> Self {
        let dims: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
        match self.dimensions.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = dims,
            None => self.dimensions.push((name.to_string(), dims)),
        }
        self
    }

    fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

impl Dataset for MemoryDataset {
    fn shape(&self, name: &str) -> Option<Vec<usize>> {
        self.get(name).map(|v| v.shape.clone())
    }

    fn variable(&self, name: &str) -> Result<Variable> {
        self.get(name)
            .cloned()
            .ok_or_else(|| ConversionError::dataset(format!("no variable named '{}'", name)))
    }

    fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    fn dimensions(&self, name: &str) -> Option<Vec<String>> {
        self.get(name)?;
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, dims)| dims.clone())
    }
}
