//! Factory presets bundled with attacca.
//!
//! Embedded at compile time, so they are available without any files on disk.
//! Each one only lists the parameters it changes from the defaults.

use crate::Preset;

/// Factory preset ids, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "punchy_drums",
    "tight_snare",
    "tame_room",
    "parallel_smash",
    "soft_tape",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("punchy_drums", PUNCHY_DRUMS_PRESET),
    ("tight_snare", TIGHT_SNARE_PRESET),
    ("tame_room", TAME_ROOM_PRESET),
    ("parallel_smash", PARALLEL_SMASH_PRESET),
    ("soft_tape", SOFT_TAPE_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Every parameter at its default"
"#;

const PUNCHY_DRUMS_PRESET: &str = r#"
name = "Punchy Drums"
description = "Sharper hits and a slightly shorter body for full drum buses"

[params]
attack_amount = 55
sustain_amount = -20
snap_amount = 40
snap_hardness = 2.0
clipper_enabled = true
clipper_type = "quintic"
clipper_drive = 1.5
"#;

const TIGHT_SNARE_PRESET: &str = r#"
name = "Tight Snare"
description = "Crack forward, ring and room pulled back"

[params]
attack_amount = 70
attack_time = "0.5 ms"
sustain_amount = -45
release_time = "60 ms"
critical_band_weight = 1.3
focus = 1.4
"#;

const TAME_ROOM_PRESET: &str = r#"
name = "Tame Room"
description = "Softens spiky overheads and lets the room bloom"

[params]
attack_amount = -40
sustain_amount = 30
release_time = "250 ms"
temporal_weight = 1.2
"#;

const PARALLEL_SMASH_PRESET: &str = r#"
name = "Parallel Smash"
description = "Hard attack shaping blended under the dry signal"

[params]
attack_amount = 100
sustain_amount = 60
snap_amount = 150
snap_hardness = 4.0
harmonic_enhancement = 40
clipper_enabled = true
clipper_type = "hard"
clipper_drive = 3.0
mix = "45%"
"#;

const SOFT_TAPE_PRESET: &str = r#"
name = "Soft Tape"
description = "Rounded transients with gentle tape and HF saturation"

[params]
attack_amount = -25
sustain_amount = 10
hf_gain = 3.0
hf_saturation = 35
tape_clip = true
output_gain = "-1.5 dB"
"#;

/// All factory presets, in listing order.
///
/// # Example
///
/// ```rust
/// use attacca_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {:?}", preset.name, preset.description);
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Factory preset by id or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use attacca_config::get_factory_preset;
///
/// assert!(get_factory_preset("punchy_drums").is_some());
/// assert!(get_factory_preset("Punchy Drums").is_some());
/// assert!(get_factory_preset("nonexistent").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Some((*id, Preset::from_toml(toml).ok()?)))
        .find(|(id, preset)| id.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name))
        .map(|(_, preset)| preset)
}

/// Factory preset ids.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// True when `name` matches a factory preset id or display name.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
