//! Error types for vector field conversion.

use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors raised while resolving or reading a dataset.
///
/// Everything except [`ConversionError::Dataset`] is a configuration error:
/// the dataset does not contain what the configuration asks for. All of them
/// are raised before the first feature is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A configured variable does not exist in the dataset.
    #[error("missing variable '{name}' (configured by {option})")]
    MissingVariable { option: String, name: String },

    /// A variable exists but its shape does not line up with the coordinate grid.
    #[error("variable '{name}' has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A regular-grid variable does not end in the latitude then longitude dimensions.
    #[error("variable '{name}' has dimensions {actual:?}, expected trailing dimensions {expected:?}")]
    DimensionOrder {
        name: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Neither a u/v pair nor a magnitude/direction pair could be found.
    #[error("no usable vector representation: need uVar/vVar or magnitudeVar/directionVar")]
    NoVectorRepresentation,

    /// Both conversion directions were requested at once.
    #[error("convertUV and convertMagDir are mutually exclusive")]
    ConflictingFlags,

    /// A conversion flag was set without the variable pair it converts.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The dataset adapter failed to read a variable.
    #[error("dataset read failed: {0}")]
    Dataset(String),
}

impl ConversionError {
    /// Create a MissingVariable error.
    pub fn missing(option: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingVariable {
            option: option.into(),
            name: name.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(name: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            name: name.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a Dataset error.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// True for errors caused by a configuration that does not fit the dataset.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::Dataset(_))
    }
}
