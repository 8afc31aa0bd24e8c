//! Conversion configuration.
//!
//! [`ConfigFile`] mirrors the keys of a dataset configuration file as they
//! are written on disk. Sources are merged as `ConfigFile` values and then
//! resolved once into an immutable [`Configuration`], which is all the
//! conversion engine ever sees.

use serde::{Deserialize, Serialize};

/// Default latitude variable name.
pub const DEFAULT_LAT_VAR: &str = "lat";
/// Default longitude variable name.
pub const DEFAULT_LON_VAR: &str = "lon";
/// Default eastward component name, used when no vector variable is configured.
pub const DEFAULT_U_VAR: &str = "u";
/// Default northward component name, used when no vector variable is configured.
pub const DEFAULT_V_VAR: &str = "v";

/// Raw configuration as read from a file or assembled from CLI flags.
///
/// Every key is optional so that several sources can be layered with
/// [`ConfigFile::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "latVar", default, skip_serializing_if = "Option::is_none")]
    pub lat_var: Option<String>,

    #[serde(rename = "lonVar", default, skip_serializing_if = "Option::is_none")]
    pub lon_var: Option<String>,

    #[serde(rename = "magnitudeVar", default, skip_serializing_if = "Option::is_none")]
    pub magnitude_var: Option<String>,

    /// Legacy spelling of `magnitudeVar`.
    #[serde(rename = "speedVar", default, skip_serializing_if = "Option::is_none")]
    pub speed_var: Option<String>,

    #[serde(rename = "directionVar", default, skip_serializing_if = "Option::is_none")]
    pub direction_var: Option<String>,

    /// Legacy spelling of `directionVar`.
    #[serde(rename = "dirVar", default, skip_serializing_if = "Option::is_none")]
    pub dir_var: Option<String>,

    #[serde(rename = "uVar", default, skip_serializing_if = "Option::is_none")]
    pub u_var: Option<String>,

    #[serde(rename = "vVar", default, skip_serializing_if = "Option::is_none")]
    pub v_var: Option<String>,

    #[serde(rename = "convertUV", default, skip_serializing_if = "Option::is_none")]
    pub convert_uv: Option<bool>,

    #[serde(rename = "convertMagDir", default, skip_serializing_if = "Option::is_none")]
    pub convert_mag_dir: Option<bool>,

    #[serde(rename = "is360", default, skip_serializing_if = "Option::is_none")]
    pub is_360: Option<bool>,

    #[serde(rename = "extraVars", default, skip_serializing_if = "Option::is_none")]
    pub extra_vars: Option<ExtraVars>,

    /// Skip grid cells holding a missing (NaN) value instead of emitting them.
    #[serde(rename = "dropMissing", default, skip_serializing_if = "Option::is_none")]
    pub drop_missing: Option<bool>,
}

/// `extraVars` may be written as a single name or as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraVars {
    One(String),
    Many(Vec<String>),
}

impl ExtraVars {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ExtraVars::One(name) => vec![name],
            ExtraVars::Many(names) => names,
        }
    }
}

impl From<Vec<String>> for ExtraVars {
    fn from(names: Vec<String>) -> Self {
        ExtraVars::Many(names)
    }
}

/// A variable name together with the option key that supplied it.
///
/// The option is kept so errors can point at the offending config key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRef {
    pub option: &'static str,
    pub name: String,
}

impl VariableRef {
    pub fn new(option: &'static str, name: impl Into<String>) -> Self {
        Self {
            option,
            name: name.into(),
        }
    }
}

/// Pick the first configured name from a precedence-ordered alias list.
fn first_configured(aliases: &[(&'static str, &Option<String>)]) -> Option<VariableRef> {
    aliases
        .iter()
        .find_map(|&(option, value)| value.as_ref().map(|name| VariableRef::new(option, name.clone())))
}

impl ConfigFile {
    /// Layer `overrides` on top of `self`; keys set in `overrides` win.
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            lat_var: overrides.lat_var.or(self.lat_var),
            lon_var: overrides.lon_var.or(self.lon_var),
            magnitude_var: overrides.magnitude_var.or(self.magnitude_var),
            speed_var: overrides.speed_var.or(self.speed_var),
            direction_var: overrides.direction_var.or(self.direction_var),
            dir_var: overrides.dir_var.or(self.dir_var),
            u_var: overrides.u_var.or(self.u_var),
            v_var: overrides.v_var.or(self.v_var),
            convert_uv: overrides.convert_uv.or(self.convert_uv),
            convert_mag_dir: overrides.convert_mag_dir.or(self.convert_mag_dir),
            is_360: overrides.is_360.or(self.is_360),
            extra_vars: overrides.extra_vars.or(self.extra_vars),
            drop_missing: overrides.drop_missing.or(self.drop_missing),
        }
    }

    /// Apply defaults and alias precedence, producing the final configuration.
    ///
    /// `magnitudeVar` takes precedence over `speedVar` and `directionVar` over
    /// `dirVar`. The `u`/`v` defaults only apply when the file names no vector
    /// variable at all.
    pub fn resolve(self) -> Configuration {
        let magnitude = first_configured(&[
            ("magnitudeVar", &self.magnitude_var),
            ("speedVar", &self.speed_var),
        ]);
        let direction = first_configured(&[
            ("directionVar", &self.direction_var),
            ("dirVar", &self.dir_var),
        ]);
        let mut u = first_configured(&[("uVar", &self.u_var)]);
        let mut v = first_configured(&[("vVar", &self.v_var)]);

        if u.is_none() && v.is_none() && magnitude.is_none() && direction.is_none() {
            u = Some(VariableRef::new("uVar", DEFAULT_U_VAR));
            v = Some(VariableRef::new("vVar", DEFAULT_V_VAR));
        }

        Configuration {
            lat: VariableRef::new("latVar", self.lat_var.unwrap_or_else(|| DEFAULT_LAT_VAR.to_string())),
            lon: VariableRef::new("lonVar", self.lon_var.unwrap_or_else(|| DEFAULT_LON_VAR.to_string())),
            u,
            v,
            magnitude,
            direction,
            convert_uv: self.convert_uv.unwrap_or(false),
            convert_mag_dir: self.convert_mag_dir.unwrap_or(false),
            is_360: self.is_360.unwrap_or(false),
            extra_vars: self.extra_vars.map(ExtraVars::into_vec).unwrap_or_default(),
            drop_missing: self.drop_missing.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub lat: VariableRef,
    pub lon: VariableRef,
    pub u: Option<VariableRef>,
    pub v: Option<VariableRef>,
    pub magnitude: Option<VariableRef>,
    pub direction: Option<VariableRef>,
    /// Derive magnitude/direction from u/v.
    pub convert_uv: bool,
    /// Derive u/v from magnitude/direction.
    pub convert_mag_dir: bool,
    /// Longitudes are stored in `[0, 360)` and must be folded to `[-180, 180)`.
    pub is_360: bool,
    /// Additional variables copied verbatim, in output order.
    pub extra_vars: Vec<String>,
    pub drop_missing: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        ConfigFile::default().resolve()
    }
}
