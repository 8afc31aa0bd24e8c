//! End-to-end conversion of NetCDF files written to a temp directory.

use std::fs;
use std::path::Path;

use nc2geojson::{
    build_configuration, convert_file, discover_inputs, run_batch, Overrides, RunOptions,
};
use serde_json::Value;
use tempfile::TempDir;
use test_utils::{assert_approx_eq, write_packed_netcdf, write_uv_2x2_netcdf, UV_2X2_LONS_FOLDED};

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn options(dir: &TempDir) -> RunOptions {
    RunOptions {
        output_dir: dir.path().join("out"),
        max_records: None,
        pretty: false,
    }
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_convert_uv_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("currents.nc");
    write_uv_2x2_netcdf(&input).unwrap();

    let config_path = write_config(&dir, "currents.json", r#"{"convertUV": true, "is360": true}"#);
    let config = build_configuration(Some(&config_path), Overrides::default()).unwrap();

    let converted = convert_file(&input, &config, &options(&dir)).unwrap();
    assert_eq!(converted.features, 4);
    assert_eq!(converted.output, dir.path().join("out/currents.json"));

    let json = read_json(&converted.output);
    assert_eq!(json["type"], "FeatureCollection");
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 4);

    let expected_dirs = [90.0, 0.0, 270.0, 180.0];
    for (i, feature) in features.iter().enumerate() {
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Point");
        let lon = feature["geometry"]["coordinates"][0].as_f64().unwrap();
        assert_approx_eq!(lon, UV_2X2_LONS_FOLDED[i], 1e-9);

        let props = &feature["properties"];
        assert_approx_eq!(props["magnitude"].as_f64().unwrap(), 1.0, 1e-9);
        assert_approx_eq!(props["direction"].as_f64().unwrap(), expected_dirs[i], 1e-9);
    }
}

#[test]
fn test_convert_packed_legacy_names() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("waves.nc");
    write_packed_netcdf(&input).unwrap();

    let config_path = write_config(
        &dir,
        "waves.yaml",
        "speedVar: spd\ndirVar: dir\nconvertMagDir: true\nis360: true\nextraVars: temp\n",
    );
    let config = build_configuration(Some(&config_path), Overrides::default()).unwrap();

    let converted = convert_file(&input, &config, &options(&dir)).unwrap();
    assert_eq!(converted.features, 3);

    let json = read_json(&converted.output);
    let features = json["features"].as_array().unwrap();

    let first = &features[0]["properties"];
    assert_approx_eq!(first["magnitude"].as_f64().unwrap(), 0.5, 1e-9);
    assert_approx_eq!(first["u"].as_f64().unwrap(), 0.0, 1e-9);
    assert_approx_eq!(first["v"].as_f64().unwrap(), 0.5, 1e-9);
    assert_approx_eq!(first["temp"].as_f64().unwrap(), 10.0, 1e-9);

    let second = &features[1];
    assert_approx_eq!(second["geometry"]["coordinates"][0].as_f64().unwrap(), -180.0, 1e-9);
    assert_approx_eq!(second["properties"]["u"].as_f64().unwrap(), 2.0, 1e-9);
    assert!(second["properties"]["temp"].is_null());

    let third = &features[2];
    assert_approx_eq!(third["geometry"]["coordinates"][0].as_f64().unwrap(), -1.0, 1e-9);
    assert!(third["properties"]["magnitude"].is_null());
}

#[test]
fn test_drop_missing_override() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("waves.nc");
    write_packed_netcdf(&input).unwrap();

    let config_path = write_config(
        &dir,
        "waves.json",
        r#"{"magnitudeVar": "spd", "directionVar": "dir", "extraVars": ["temp"]}"#,
    );
    let overrides = Overrides {
        drop_missing: true,
        ..Default::default()
    };
    let config = build_configuration(Some(&config_path), overrides).unwrap();

    let converted = convert_file(&input, &config, &options(&dir)).unwrap();
    assert_eq!(converted.features, 1);

    let json = read_json(&converted.output);
    let props = &json["features"][0]["properties"];
    assert_approx_eq!(props["magnitude"].as_f64().unwrap(), 0.5, 1e-9);
    assert!(props.get("u").is_none());
}

#[test]
fn test_max_records() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("currents.nc");
    write_uv_2x2_netcdf(&input).unwrap();

    let config = build_configuration(None, Overrides::default()).unwrap();
    let options = RunOptions {
        max_records: Some(3),
        ..options(&dir)
    };

    let converted = convert_file(&input, &config, &options).unwrap();
    assert_eq!(converted.features, 3);

    let json = read_json(&converted.output);
    let props = &json["features"][0]["properties"];
    assert_approx_eq!(props["u"].as_f64().unwrap(), 1.0, 1e-9);
    assert!(props.get("magnitude").is_none());
}

#[test]
fn test_batch_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    let inputs_dir = dir.path().join("in");
    fs::create_dir(&inputs_dir).unwrap();

    write_uv_2x2_netcdf(&inputs_dir.join("a.nc")).unwrap();
    fs::write(inputs_dir.join("b.nc"), b"not a netcdf file").unwrap();
    write_uv_2x2_netcdf(&inputs_dir.join("c.nc")).unwrap();

    let inputs = discover_inputs(&inputs_dir).unwrap();
    assert_eq!(inputs.len(), 3);

    let config = build_configuration(None, Overrides::default()).unwrap();
    let report = run_batch(&inputs, &config, &options(&dir));

    assert_eq!(report.converted.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("b.nc"));
    assert!(dir.path().join("out/a.json").exists());
    assert!(!dir.path().join("out/b.json").exists());
    assert!(dir.path().join("out/c.json").exists());

    let err = report.into_result().unwrap_err();
    assert_eq!(err.failed, 1);
    assert_eq!(err.total, 3);
}

#[test]
fn test_missing_variable_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("currents.nc");
    write_uv_2x2_netcdf(&input).unwrap();

    let config_path = write_config(&dir, "bad.json", r#"{"extraVars": "salinity"}"#);
    let config = build_configuration(Some(&config_path), Overrides::default()).unwrap();

    let err = convert_file(&input, &config, &options(&dir)).unwrap_err();
    assert!(format!("{:#}", err).contains("salinity"));
    assert!(!dir.path().join("out/currents.json").exists());
}
