//! Small NetCDF files for adapter and end-to-end tests.

use std::path::Path;

/// Fill value used by [`write_packed_netcdf`] for the packed speed variable.
pub const PACKED_FILL: i16 = -32767;

/// Missing-value marker used by [`write_packed_netcdf`] for `temp`.
pub const TEMP_MISSING: f64 = 9999.0;

/// Write `f64` variables over the given dimensions into a new NetCDF file.
///
/// Each variable is `(name, dimension names, row-major data)`.
pub fn write_netcdf(
    path: &Path,
    dims: &[(&str, usize)],
    vars: &[(&str, &[&str], Vec<f64>)],
) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    for (name, len) in dims {
        file.add_dimension(name, *len)?;
    }
    for (name, var_dims, data) in vars {
        let mut var = file.add_variable::<f64>(name, var_dims)?;
        var.put_values(data, ..)?;
    }
    Ok(())
}

/// The 2x2 curvilinear u/v grid from [`crate::uv_2x2_dataset`] as a NetCDF file.
pub fn write_uv_2x2_netcdf(path: &Path) -> Result<(), netcdf::Error> {
    write_netcdf(
        path,
        &[("y", 2), ("x", 2)],
        &[
            ("lat", &["y", "x"], vec![-5.0, -5.0, 5.0, 5.0]),
            ("lon", &["y", "x"], crate::UV_2X2_LONS.to_vec()),
            ("u", &["y", "x"], vec![1.0, 0.0, -1.0, 0.0]),
            ("v", &["y", "x"], vec![0.0, 1.0, 0.0, -1.0]),
        ],
    )
}

/// A 1x3 regular grid with CF-packed speed and a float temperature.
///
/// `spd` is stored as `i16` with `scale_factor = 0.01`, `add_offset = 1.0`
/// and holds `[0.5, 2.0, fill]`; `temp` holds `[10.0, missing, 12.0]`
/// with a `missing_value` attribute. `dir` is `[0, 90, 180]` and `time` a
/// length-1 leading dimension on the data variables.
pub fn write_packed_netcdf(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    file.add_dimension("time", 1)?;
    file.add_dimension("lat", 1)?;
    file.add_dimension("lon", 3)?;

    let mut lat = file.add_variable::<f64>("lat", &["lat"])?;
    lat.put_attribute("units", "degrees_north")?;
    lat.put_values(&[40.0f64], ..)?;

    let mut lon = file.add_variable::<f64>("lon", &["lon"])?;
    lon.put_attribute("units", "degrees_east")?;
    lon.put_values(&[0.0f64, 180.0, 359.0], ..)?;

    let mut spd = file.add_variable::<i16>("spd", &["time", "lat", "lon"])?;
    spd.set_fill_value(PACKED_FILL)?;
    spd.put_attribute("scale_factor", 0.01f64)?;
    spd.put_attribute("add_offset", 1.0f64)?;
    spd.put_values(&[-50i16, 100, PACKED_FILL], ..)?;

    let mut dir = file.add_variable::<f32>("dir", &["time", "lat", "lon"])?;
    dir.put_values(&[0.0f32, 90.0, 180.0], ..)?;

    let mut temp = file.add_variable::<f64>("temp", &["time", "lat", "lon"])?;
    temp.put_attribute("missing_value", TEMP_MISSING)?;
    temp.put_values(&[10.0, TEMP_MISSING, 12.0], ..)?;

    Ok(())
}
