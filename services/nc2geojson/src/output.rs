//! Writing feature collections to the output directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geojson_vectors::FeatureCollection;

/// Output file for an input dataset: `<output_dir>/<input stem>.json`.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.json", stem))
}

/// Serialize `collection` to `path`, creating parent directories as needed.
pub fn write_collection(path: &Path, collection: &FeatureCollection, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, collection)
    } else {
        collection.write_to(&mut writer)
    };
    written.with_context(|| format!("Failed to write GeoJSON to {:?}", path))?;

    writer
        .flush()
        .with_context(|| format!("Failed to flush {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson_vectors::Feature;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_uses_stem() {
        let path = output_path(Path::new("out"), Path::new("/data/hycom_2024.nc"));
        assert_eq!(path, PathBuf::from("out/hycom_2024.json"));
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/points.json");
        let collection = FeatureCollection {
            features: vec![Feature::point(-170.0, 5.0)],
            ..Default::default()
        };

        write_collection(&path, &collection, false).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["geometry"]["coordinates"][0], -170.0);
    }

    #[test]
    fn test_write_pretty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        write_collection(&path, &FeatureCollection::new(), true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains('\n'));
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["features"].as_array().unwrap().len(), 0);
    }
}
