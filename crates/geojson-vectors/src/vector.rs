//! Conversion between Cartesian (u/v) and polar (magnitude/direction) vectors.
//!
//! Direction is a compass bearing in degrees, clockwise from north, pointing
//! the way the vector travels (oceanographic convention): an eastward vector
//! (u > 0, v = 0) has direction 90.

/// Magnitude and direction of a (u, v) vector.
///
/// The direction of a zero vector is 0. NaN input gives NaN output.
pub fn uv_to_mag_dir(u: f64, v: f64) -> (f64, f64) {
    let magnitude = u.hypot(v);

    if u == 0.0 && v == 0.0 {
        return (magnitude, 0.0);
    }

    let direction = (90.0 - v.atan2(u).to_degrees()).rem_euclid(360.0);
    // rem_euclid can land on exactly 360 after rounding
    let direction = if direction >= 360.0 { 0.0 } else { direction };

    (magnitude, direction)
}

/// The (u, v) components of a magnitude and compass direction in degrees.
pub fn mag_dir_to_uv(magnitude: f64, direction: f64) -> (f64, f64) {
    let rad = direction.to_radians();
    (magnitude * rad.sin(), magnitude * rad.cos())
}

/// One vector sample in whichever representation the dataset stores.
///
/// The stored pair is authoritative; the other pair is derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorSample {
    Cartesian { u: f64, v: f64 },
    Polar { magnitude: f64, direction: f64 },
}

impl VectorSample {
    /// (u, v), derived if the sample is polar.
    pub fn uv(&self) -> (f64, f64) {
        match *self {
            VectorSample::Cartesian { u, v } => (u, v),
            VectorSample::Polar {
                magnitude,
                direction,
            } => mag_dir_to_uv(magnitude, direction),
        }
    }

    /// (magnitude, direction), derived if the sample is Cartesian.
    pub fn mag_dir(&self) -> (f64, f64) {
        match *self {
            VectorSample::Cartesian { u, v } => uv_to_mag_dir(u, v),
            VectorSample::Polar {
                magnitude,
                direction,
            } => (magnitude, direction),
        }
    }
}
