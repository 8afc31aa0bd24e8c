//! GeoJSON point features built from grid cells.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::coords::normalize_longitude;
use crate::grid::GridIndex;
use crate::resolver::{ResolvedVariables, VectorSource};

/// Output attribute name for the eastward component.
pub const U_ATTR: &str = "u";
/// Output attribute name for the northward component.
pub const V_ATTR: &str = "v";
/// Output attribute name for the vector magnitude.
pub const MAGNITUDE_ATTR: &str = "magnitude";
/// Output attribute name for the compass direction.
pub const DIRECTION_ATTR: &str = "direction";

/// GeoJSON geometry. Grid cells only ever produce points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        /// Coordinates as [longitude, latitude].
        coordinates: [f64; 2],
    },
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }
}

/// Flat attribute mapping that keeps insertion order.
///
/// Missing values (NaN) serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(String, f64)>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute; an existing attribute of the same name is overwritten in place.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, value)| *value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            let value = if value.is_nan() { None } else { Some(*value) };
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// A GeoJSON point feature for one grid cell.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub geometry: Geometry,

    pub properties: Properties,
}

impl Feature {
    /// Create a point feature with no attributes.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry: Geometry::point(lon, lat),
            properties: Properties::new(),
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn lon(&self) -> f64 {
        match self.geometry {
            Geometry::Point { coordinates } => coordinates[0],
        }
    }

    pub fn lat(&self) -> f64 {
        match self.geometry {
            Geometry::Point { coordinates } => coordinates[1],
        }
    }

    /// True if the position or any attribute is NaN.
    pub fn has_missing(&self) -> bool {
        self.lon().is_nan() || self.lat().is_nan() || self.properties.iter().any(|(_, v)| v.is_nan())
    }
}

/// Build the feature for one grid cell.
///
/// `index` must lie inside `resolved.shape()`; [`crate::grid::iterate`]
/// guarantees that.
pub fn build(index: GridIndex, resolved: &ResolvedVariables, config: &Configuration) -> Feature {
    let (lon, lat) = resolved.position(index);
    let lon = normalize_longitude(lon, config.is_360);

    let sample = resolved.vector_at(index);
    let derive = resolved.derives_other_representation();
    let mut properties = Properties::new();

    let emit_uv = derive || matches!(resolved.vector_source(), VectorSource::Cartesian { .. });
    let emit_mag_dir = derive || matches!(resolved.vector_source(), VectorSource::Polar { .. });

    if emit_uv {
        let (u, v) = sample.uv();
        properties.insert(U_ATTR, u);
        properties.insert(V_ATTR, v);
    }
    if emit_mag_dir {
        let (magnitude, direction) = sample.mag_dir();
        properties.insert(MAGNITUDE_ATTR, magnitude);
        properties.insert(DIRECTION_ATTR, direction);
    }

    for (name, value) in resolved.extras_at(index) {
        properties.insert(name, value);
    }

    Feature::point(lon, lat).with_properties(properties)
}
