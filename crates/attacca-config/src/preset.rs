//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use attacca_core::ParameterInfo;

use crate::error::ConfigError;
use crate::param_value::ParamValue;
use crate::validation::{ValidationError, collect_errors, validate_param};

/// A named set of parameter values.
///
/// Keys are parameter string ids (display names and short names are also
/// accepted when applying). Parameters not listed keep their current value.
///
/// # TOML Format
///
/// ```toml
/// name = "Punchy Drums"
/// description = "Sharper hits, shorter tails"
///
/// [params]
/// attack_amount = 60
/// sustain_amount = "-25%"
/// release_time = "80 ms"
/// clipper_enabled = true
/// clipper_type = "tangent"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by string id.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add or replace a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add or replace a parameter value in place.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when the preset stores no values.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset by file path, user/system preset name, or factory
    /// preset name, in that order.
    pub fn find(name: &str) -> Result<Self, ConfigError> {
        if let Some(path) = crate::paths::find_preset(name) {
            return Self::load(path);
        }
        crate::factory_presets::get_factory_preset(name)
            .ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every value against `target`'s descriptors.
    ///
    /// Returns the resolved `(index, value)` pairs, or every error found.
    pub fn resolve<P: ParameterInfo + ?Sized>(
        &self,
        target: &P,
    ) -> Result<Vec<(usize, f32)>, ValidationError> {
        let mut resolved = Vec::with_capacity(self.params.len());
        let mut errors = Vec::new();
        for (key, value) in &self.params {
            match validate_param(target, key, value) {
                Ok(pair) => resolved.push(pair),
                Err(e) => errors.push(e),
            }
        }
        collect_errors(errors)?;
        Ok(resolved)
    }

    /// Validate, then apply every value to `target`.
    ///
    /// Nothing is written unless every value validates.
    pub fn apply_to<P: ParameterInfo + ?Sized>(&self, target: &mut P) -> Result<(), ConfigError> {
        for (index, value) in self.resolve(target)? {
            target.set_param(index, value);
        }
        Ok(())
    }

    /// Snapshot every parameter of `source`.
    ///
    /// Switches are stored as booleans, choices as their label, everything
    /// else as a number in display units.
    pub fn capture<P: ParameterInfo + ?Sized>(name: impl Into<String>, source: &P) -> Self {
        let mut preset = Self::new(name);
        for index in 0..source.param_count() {
            let Some(desc) = source.param_info(index) else {
                continue;
            };
            if desc.string_id.is_empty() {
                continue;
            }
            let value = source.get_param(index);
            let stored = match desc.labels.len() {
                2 => ParamValue::Bool(value >= 0.5),
                n if n > 2 => desc
                    .value_label(value)
                    .map_or_else(|| ParamValue::rounded(value), ParamValue::from),
                _ => ParamValue::rounded(value),
            };
            preset.params.insert(desc.string_id.to_string(), stored);
        }
        preset
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
