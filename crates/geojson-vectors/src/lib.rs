//! Conversion of gridded CF vector fields into GeoJSON point features.
//!
//! A dataset holding latitude/longitude coordinates and a vector field, stored
//! either as u/v components or as magnitude/direction, is turned into one
//! point feature per grid cell:
//!
//! 1. [`resolver::resolve`] locates and validates every configured variable.
//! 2. [`grid::iterate`] walks the grid in row-major order.
//! 3. [`feature::build`] normalizes the longitude, converts the vector and
//!    copies extra variables for each cell.
//! 4. [`collection::assemble`] gathers the features into a collection.
//!
//! [`convert`] runs the whole pipeline.
//!
//! # Example
//!
//! ```
//! use geojson_vectors::{convert, ConfigFile, MemoryDataset, Variable};
//!
//! let dataset = MemoryDataset::new()
//!     .with_variable(Variable::new("lat", vec![1], vec![45.0]).unwrap())
//!     .with_variable(Variable::new("lon", vec![2], vec![350.0, 10.0]).unwrap())
//!     .with_variable(Variable::new("u", vec![1, 2], vec![1.0, 0.0]).unwrap())
//!     .with_variable(Variable::new("v", vec![1, 2], vec![0.0, 1.0]).unwrap());
//!
//! let config = ConfigFile {
//!     convert_uv: Some(true),
//!     is_360: Some(true),
//!     ..Default::default()
//! }
//! .resolve();
//!
//! let collection = convert(&dataset, &config, None).unwrap();
//! assert_eq!(collection.len(), 2);
//! assert_eq!(collection.features[0].lon(), -10.0);
//! assert_eq!(collection.features[0].properties.get("direction"), Some(90.0));
//! ```

pub mod collection;
pub mod config;
pub mod coords;
pub mod dataset;
pub mod error;
pub mod feature;
pub mod grid;
pub mod resolver;
pub mod vector;

pub use collection::{assemble, FeatureCollection};
pub use config::{ConfigFile, Configuration, ExtraVars, VariableRef};
pub use coords::normalize_longitude;
pub use dataset::{Dataset, MemoryDataset, Variable};
pub use error::{ConversionError, Result};
pub use feature::{build, Feature, Geometry, Properties};
pub use grid::{iterate, GridIndex, GridIter, GridShape};
pub use resolver::{resolve, ResolvedVariables};
pub use vector::{mag_dir_to_uv, uv_to_mag_dir, VectorSample};

use tracing::{debug, info, warn};

/// Convert a dataset into a feature collection.
///
/// `max_records` caps the number of features produced. When the configuration
/// asks for missing values to be dropped, the cap counts emitted features, not
/// visited grid cells.
pub fn convert<D: Dataset + ?Sized>(
    dataset: &D,
    config: &Configuration,
    max_records: Option<usize>,
) -> Result<FeatureCollection> {
    let resolved = resolve(dataset, config)?;
    let shape = resolved.shape();
    debug!(
        cells = shape.len(),
        max_records = ?max_records,
        extras = resolved.extras().len(),
        "Building features"
    );

    let collection = if config.drop_missing {
        let mut dropped = 0usize;
        let features = iterate(shape, None)
            .map(|index| build(index, &resolved, config))
            .filter(|feature| {
                let keep = !feature.has_missing();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .take(max_records.unwrap_or(usize::MAX));
        let collection = assemble(features);
        if dropped > 0 {
            warn!(dropped, "Skipped grid cells with missing values");
        }
        collection
    } else {
        assemble(iterate(shape, max_records).map(|index| build(index, &resolved, config)))
    };

    info!(features = collection.len(), "Converted grid to features");
    Ok(collection)
}
