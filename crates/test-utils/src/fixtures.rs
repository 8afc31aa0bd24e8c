//! Common dataset and configuration fixtures.
//!
//! The datasets are small enough to check by hand; variable names follow the
//! defaults (`lat`, `lon`, `u`, `v`) unless noted.

use geojson_vectors::{ConfigFile, Configuration, MemoryDataset, Variable};

use crate::generators::{
    create_axis, create_direction_grid, create_lon_axis_360, create_speed_grid, create_u_grid,
    create_v_grid,
};

/// Build a variable, panicking on a shape/data mismatch.
pub fn variable(name: &str, shape: &[usize], data: Vec<f64>) -> Variable {
    match Variable::new(name, shape.to_vec(), data) {
        Ok(var) => var,
        Err(err) => panic!("bad fixture variable '{}': {}", name, err),
    }
}

/// Longitudes of the 2x2 curvilinear fixture, stored in the 0-360 convention.
pub const UV_2X2_LONS: [f64; 4] = [10.0, 350.0, 170.0, 190.0];

/// Those longitudes after folding into `[-180, 180)`.
pub const UV_2X2_LONS_FOLDED: [f64; 4] = [10.0, -10.0, 170.0, -170.0];

/// 2x2 curvilinear grid with u/v components.
///
/// Cells carry an east, north, west and south pointing unit vector.
pub fn uv_2x2_dataset() -> MemoryDataset {
    MemoryDataset::new()
        .with_variable(variable("lat", &[2, 2], vec![-5.0, -5.0, 5.0, 5.0]))
        .with_variable(variable("lon", &[2, 2], UV_2X2_LONS.to_vec()))
        .with_variable(variable("u", &[2, 2], vec![1.0, 0.0, -1.0, 0.0]))
        .with_variable(variable("v", &[2, 2], vec![0.0, 1.0, 0.0, -1.0]))
}

/// Regular grid with 1-D axes, 0-360 longitudes and u/v on a `[1, rows, cols]` time slice.
pub fn regular_uv_dataset(rows: usize, cols: usize) -> MemoryDataset {
    MemoryDataset::new()
        .with_variable(variable("lat", &[rows], create_axis(rows, -60.0, 1.0)))
        .with_variable(variable("lon", &[cols], create_lon_axis_360(cols)))
        .with_variable(variable("u", &[1, rows, cols], create_u_grid(rows, cols)))
        .with_variable(variable("v", &[1, rows, cols], create_v_grid(rows, cols)))
}

/// Regular grid storing speed/direction under legacy names `spd`/`dir`.
pub fn mag_dir_dataset(rows: usize, cols: usize) -> MemoryDataset {
    MemoryDataset::new()
        .with_variable(variable("lat", &[rows], create_axis(rows, 30.0, 0.5)))
        .with_variable(variable("lon", &[cols], create_axis(cols, -80.0, 0.5)))
        .with_variable(variable("spd", &[rows, cols], create_speed_grid(rows, cols)))
        .with_variable(variable("dir", &[rows, cols], create_direction_grid(rows, cols, 7)))
}

/// Configuration fixtures.
pub mod configs {
    use super::*;

    /// u/v input, derive magnitude/direction, fold 0-360 longitudes.
    pub fn convert_uv_360() -> Configuration {
        ConfigFile {
            convert_uv: Some(true),
            is_360: Some(true),
            ..Default::default()
        }
        .resolve()
    }

    /// Legacy `speedVar`/`dirVar` names for [`mag_dir_dataset`].
    pub fn legacy_mag_dir(convert: bool) -> Configuration {
        ConfigFile {
            speed_var: Some("spd".to_string()),
            dir_var: Some("dir".to_string()),
            convert_mag_dir: Some(convert),
            ..Default::default()
        }
        .resolve()
    }
}
