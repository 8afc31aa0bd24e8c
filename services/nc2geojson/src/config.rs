//! Loading dataset configuration files and merging CLI overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geojson_vectors::{ConfigFile, Configuration, ExtraVars};

/// Settings given on the command line that override the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub is_360: bool,
    pub drop_missing: bool,
    pub extra_vars: Vec<String>,
}

impl Overrides {
    /// Flags only override when set, so an absent flag never resets the file.
    fn into_config_file(self) -> ConfigFile {
        ConfigFile {
            is_360: self.is_360.then_some(true),
            drop_missing: self.drop_missing.then_some(true),
            extra_vars: (!self.extra_vars.is_empty()).then(|| ExtraVars::Many(self.extra_vars)),
            ..Default::default()
        }
    }
}

/// Load a dataset configuration file.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let config = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config YAML from {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON from {:?}", path))?
    };

    Ok(config)
}

/// Resolve the configuration for a run: defaults < file < CLI overrides.
pub fn build_configuration(config_file: Option<&Path>, overrides: Overrides) -> Result<Configuration> {
    let file = match config_file {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };
    Ok(file.merge(overrides.into_config_file()).resolve())
}
