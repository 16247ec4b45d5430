//! Presets and parameter validation for the attacca transient designer.
//!
//! # Features
//!
//! - **Presets**: TOML files with a `[params]` table keyed by parameter id
//! - **Validation**: range, unit and label checks against [`ParamDescriptor`] metadata
//! - **Factory Presets**: Built-in starting points, always available
//! - **Paths**: Platform-specific user and system preset directories
//!
//! # Example
//!
//! ```rust,no_run
//! use attacca_config::{Preset, paths::user_presets_dir};
//! use attacca_effects::TransientDesigner;
//!
//! let mut designer = TransientDesigner::new(48000.0, 2);
//! Preset::find("punchy_drums").unwrap().apply_to(&mut designer).unwrap();
//!
//! let mine = Preset::capture("My Drums", &designer).with_description("Tweaked punch");
//! mine.save(user_presets_dir().join("my_drums.toml")).unwrap();
//! ```
//!
//! [`ParamDescriptor`]: attacca_core::ParamDescriptor

mod error;
mod param_value;
mod preset;

/// Platform-specific preset directories.
pub mod paths;

/// Parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::{ConfigError, FileAction};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use param_value::ParamValue;
pub use paths::{
    ensure_user_presets_dir, find_preset, list_all_presets, list_system_presets,
    list_user_presets, preset_name_from_path, system_presets_dir, user_presets_dir,
};
pub use preset::Preset;
pub use validation::{
    ValidationError, ValidationResult, apply_assignment, parse_assignment, parse_param_value,
    parse_text_value, validate_param,
};
