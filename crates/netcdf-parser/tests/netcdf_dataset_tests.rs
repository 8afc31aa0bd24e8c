//! Tests for reading NetCDF files through the Dataset trait.

use geojson_vectors::{convert, ConfigFile, ConversionError, Dataset};
use netcdf_parser::{NetCdfDataset, NetCdfError};
use tempfile::TempDir;
use test_utils::{
    assert_approx_eq, write_netcdf, write_packed_netcdf, write_uv_2x2_netcdf, UV_2X2_LONS_FOLDED,
};

fn packed_file() -> (TempDir, NetCdfDataset) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("packed.nc");
    write_packed_netcdf(&path).unwrap();
    let dataset = NetCdfDataset::open(&path).unwrap();
    (dir, dataset)
}

// ============================================================================
// Dataset trait
// ============================================================================

#[test]
fn test_shapes_and_names() {
    let (_dir, ds) = packed_file();

    assert_eq!(ds.shape("lat"), Some(vec![1]));
    assert_eq!(ds.shape("lon"), Some(vec![3]));
    assert_eq!(ds.shape("spd"), Some(vec![1, 1, 3]));
    assert_eq!(ds.shape("nope"), None);

    let names = ds.variable_names();
    for name in ["lat", "lon", "spd", "dir", "temp"] {
        assert!(names.iter().any(|n| n == name), "missing {}", name);
    }
}

#[test]
fn test_packed_values_are_unpacked() {
    let (_dir, ds) = packed_file();
    let spd = ds.variable("spd").unwrap();

    assert_eq!(spd.shape(), &[1, 1, 3]);
    assert_approx_eq!(spd.at(0), 0.5, 1e-9);
    assert_approx_eq!(spd.at(1), 2.0, 1e-9);
    assert!(spd.at(2).is_nan(), "fill value should read as NaN");
}

#[test]
fn test_missing_value_attribute() {
    let (_dir, ds) = packed_file();
    let temp = ds.variable("temp").unwrap();
    assert_eq!(temp.at(0), 10.0);
    assert!(temp.at(1).is_nan());
    assert_eq!(temp.at(2), 12.0);
}

#[test]
fn test_float_variable_read_as_f64() {
    let (_dir, ds) = packed_file();
    let dir = ds.variable("dir").unwrap();
    assert_eq!(dir.data(), &[0.0, 90.0, 180.0]);
}

#[test]
fn test_missing_variable_is_dataset_error() {
    let (_dir, ds) = packed_file();
    let err = ds.variable("nope").unwrap_err();
    assert!(!err.is_configuration_error());
}

#[test]
fn test_open_nonexistent_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = NetCdfDataset::open(dir.path().join("absent.nc")).unwrap_err();
    match err {
        NetCdfError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected IoError, got {:?}", other),
    }
}

#[test]
fn test_open_non_netcdf_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.nc");
    std::fs::write(&path, b"not a netcdf file").unwrap();
    assert!(matches!(
        NetCdfDataset::open(&path),
        Err(NetCdfError::OpenFailed { .. })
    ));
}

#[test]
fn test_dimension_names() {
    let (_dir, ds) = packed_file();
    assert_eq!(
        ds.dimensions("spd"),
        Some(vec!["time".to_string(), "lat".to_string(), "lon".to_string()])
    );
    assert_eq!(ds.dimensions("lon"), Some(vec!["lon".to_string()]));
    assert_eq!(ds.dimensions("nope"), None);
}

// ============================================================================
// End to end through the engine
// ============================================================================

#[test]
fn test_convert_uv_2x2_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("uv.nc");
    write_uv_2x2_netcdf(&path).unwrap();
    let ds = NetCdfDataset::open(&path).unwrap();

    let config = ConfigFile {
        convert_uv: Some(true),
        is_360: Some(true),
        ..Default::default()
    }
    .resolve();
    let fc = convert(&ds, &config, None).unwrap();

    let lons: Vec<f64> = fc.iter().map(|f| f.lon()).collect();
    assert_eq!(lons, UV_2X2_LONS_FOLDED.to_vec());
    for feature in &fc {
        for key in ["u", "v", "magnitude", "direction"] {
            assert!(feature.properties.contains_key(key));
        }
    }
}

#[test]
fn test_convert_packed_mag_dir_with_drop_missing() {
    let (_dir, ds) = packed_file();
    let config = ConfigFile {
        speed_var: Some("spd".into()),
        dir_var: Some("dir".into()),
        convert_mag_dir: Some(true),
        is_360: Some(true),
        extra_vars: Some(vec!["temp".to_string()].into()),
        drop_missing: Some(true),
        ..Default::default()
    }
    .resolve();

    let fc = convert(&ds, &config, None).unwrap();

    // Cell 1 has a missing temperature and cell 2 a fill-valued speed.
    assert_eq!(fc.len(), 1);
    let feature = &fc.features[0];
    assert_eq!(feature.lon(), 0.0);
    assert_eq!(feature.lat(), 40.0);
    assert_approx_eq!(feature.properties.get("u").unwrap(), 0.0, 1e-9);
    assert_approx_eq!(feature.properties.get("v").unwrap(), 0.5, 1e-9);
    assert_eq!(feature.properties.get("temp"), Some(10.0));
}

#[test]
fn test_transposed_vector_on_square_grid_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transposed.nc");
    write_netcdf(
        &path,
        &[("lat", 2), ("lon", 2)],
        &[
            ("lat", &["lat"], vec![0.0, 1.0]),
            ("lon", &["lon"], vec![10.0, 20.0]),
            ("u", &["lon", "lat"], vec![1.0, 2.0, 3.0, 4.0]),
            ("v", &["lon", "lat"], vec![1.0, 2.0, 3.0, 4.0]),
        ],
    )
    .unwrap();

    let ds = NetCdfDataset::open(&path).unwrap();
    let err = convert(&ds, &ConfigFile::default().resolve(), None).unwrap_err();
    assert!(matches!(err, ConversionError::DimensionOrder { .. }));
    assert!(err.to_string().contains("'u'"));
}
