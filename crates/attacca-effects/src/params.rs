//! Parameter snapshot and descriptor table for the transient designer.
//!
//! [`TransientParams`] is a plain `Copy` struct read once at the start of
//! every block. [`DESCRIPTORS`] lists every control of
//! [`TransientDesigner`](crate::TransientDesigner) in index order; the
//! snapshot owns indices 1 through 22 and the wrapper owns the rest (input
//! trim, bypass, output trim).
//!
//! ## Parameter Indices
//!
//! | Index | String ID | Range | Default |
//! |-------|-----------|-------|---------|
//! | 0 | `input_gain` | -24–24 dB | 0 |
//! | 1 | `attack_amount` | -100–100% | 0 |
//! | 2 | `attack_time` | 0.1–100 ms | 1 |
//! | 3 | `attack_threshold` | -60–0 dB | -40 |
//! | 4 | `sustain_amount` | -100–100% | 0 |
//! | 5 | `release_time` | 1–1000 ms | 100 |
//! | 6 | `sustain_threshold` | -60–0 dB | -40 |
//! | 7 | `masking_threshold` | -30–0 dB | -15 |
//! | 8 | `critical_band_weight` | 0–2 | 1 |
//! | 9 | `temporal_weight` | 0–2 | 1 |
//! | 10 | `snap_amount` | 0–200% | 0 |
//! | 11 | `snap_hardness` | 0.1–10 | 1 |
//! | 12 | `harmonic_enhancement` | 0–100% | 0 |
//! | 13 | `focus` | 1–5 | 1 |
//! | 14 | `hf_gain` | 1–10 | 1 |
//! | 15 | `hf_saturation` | 0–100% | 0 |
//! | 16 | `tape_clip` | off/on | off |
//! | 17 | `clipper_enabled` | off/on | off |
//! | 18 | `clipper_ceiling` | 0.1–1.0 | 0.8 |
//! | 19 | `clipper_type` | Hard…Arctangent | Quintic |
//! | 20 | `clipper_drive` | 1–10 | 2 |
//! | 21 | `mix` | 0–100% | 100 |
//! | 22 | `auto_gain_comp` | off/on | on |
//! | 23 | `bypass` | off/on | off |
//! | 24 | `output_gain` | -24–24 dB | 0 |

use attacca_core::gain::{input_param_descriptor, output_param_descriptor};
use attacca_core::{ClipperType, ParamDescriptor, ParamId};

/// Number of parameters exposed by the designer.
pub const PARAM_COUNT: usize = 25;

/// Base of the designer's [`ParamId`] range.
pub const PARAM_ID_BASE: u32 = 2100;

/// Index of the input trim.
pub const INPUT_GAIN: usize = 0;
/// Index of the bypass switch.
pub const BYPASS: usize = 23;
/// Index of the output trim.
pub const OUTPUT_GAIN: usize = 24;

const fn id(index: u32) -> ParamId {
    ParamId(PARAM_ID_BASE + index)
}

/// Descriptor for every designer parameter, in index order.
pub static DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    input_param_descriptor()
        .with_id(id(0), "input_gain")
        .with_group("io"),
    ParamDescriptor::amount("Attack Amount", "Attack")
        .with_id(id(1), "attack_amount")
        .with_group("attack"),
    ParamDescriptor::time_ms("Attack Time", "AtkTime", 0.1, 100.0, 1.0)
        .with_id(id(2), "attack_time")
        .with_step(0.1)
        .with_group("attack"),
    ParamDescriptor::gain_db("Attack Threshold", "AtkThr", -60.0, 0.0, -40.0)
        .with_id(id(3), "attack_threshold")
        .with_group("attack"),
    ParamDescriptor::amount("Sustain Amount", "Sustain")
        .with_id(id(4), "sustain_amount")
        .with_group("sustain"),
    ParamDescriptor::time_ms("Release Time", "Release", 1.0, 1000.0, 100.0)
        .with_id(id(5), "release_time")
        .with_group("sustain"),
    ParamDescriptor::gain_db("Sustain Threshold", "SusThr", -60.0, 0.0, -40.0)
        .with_id(id(6), "sustain_threshold")
        .with_group("sustain"),
    ParamDescriptor::gain_db("Masking Threshold", "Masking", -30.0, 0.0, -15.0)
        .with_id(id(7), "masking_threshold")
        .with_group("psychoacoustic"),
    ParamDescriptor::scalar("Critical Band Weight", "CBWeight", 0.0, 2.0, 1.0)
        .with_id(id(8), "critical_band_weight")
        .with_group("psychoacoustic"),
    ParamDescriptor::scalar("Temporal Weight", "TmpWeight", 0.0, 2.0, 1.0)
        .with_id(id(9), "temporal_weight")
        .with_group("psychoacoustic"),
    ParamDescriptor::percent("Snap Amount", "Snap", 0.0, 200.0, 0.0)
        .with_id(id(10), "snap_amount")
        .with_group("shape"),
    ParamDescriptor::scalar("Snap Hardness", "Hardness", 0.1, 10.0, 1.0)
        .with_id(id(11), "snap_hardness")
        .with_group("shape"),
    ParamDescriptor::percent("Harmonic Enhancement", "Harmonic", 0.0, 100.0, 0.0)
        .with_id(id(12), "harmonic_enhancement")
        .with_group("shape"),
    ParamDescriptor::scalar("Focus", "Focus", 1.0, 5.0, 1.0)
        .with_id(id(13), "focus")
        .with_group("shape"),
    ParamDescriptor::scalar("HF Gain", "HFGain", 1.0, 10.0, 1.0)
        .with_id(id(14), "hf_gain")
        .with_group("shape"),
    ParamDescriptor::percent("HF Saturation", "HFSat", 0.0, 100.0, 0.0)
        .with_id(id(15), "hf_saturation")
        .with_group("shape"),
    ParamDescriptor::toggle("Tape Clip", "Tape", false)
        .with_id(id(16), "tape_clip")
        .with_group("shape"),
    ParamDescriptor::toggle("Clipper", "Clipper", false)
        .with_id(id(17), "clipper_enabled")
        .with_group("clipper"),
    ParamDescriptor::scalar("Clipper Ceiling", "Ceiling", 0.1, 1.0, 0.8)
        .with_id(id(18), "clipper_ceiling")
        .with_group("clipper"),
    ParamDescriptor::choice("Clipper Type", "ClipType", &ClipperType::LABELS, 1)
        .with_id(id(19), "clipper_type")
        .with_group("clipper"),
    ParamDescriptor::scalar("Clipper Drive", "Drive", 1.0, 10.0, 2.0)
        .with_id(id(20), "clipper_drive")
        .with_step(0.1)
        .with_group("clipper"),
    ParamDescriptor::mix()
        .with_id(id(21), "mix")
        .with_group("io"),
    ParamDescriptor::toggle("Auto Gain Comp", "AutoGain", true)
        .with_id(id(22), "auto_gain_comp")
        .with_group("io"),
    ParamDescriptor::toggle("Bypass", "Bypass", false)
        .with_id(id(23), "bypass")
        .with_group("io"),
    output_param_descriptor()
        .with_id(id(24), "output_gain")
        .with_group("io"),
];

/// Per-block parameter snapshot consumed by
/// [`TransientDesignerCore`](crate::TransientDesignerCore).
///
/// Values are in display units except `mix`, which is a fraction in
/// `[0, 1]`. The core does not validate ranges; use
/// [`clamped`](Self::clamped) or the [`ParameterInfo`] surface of
/// [`TransientDesigner`](crate::TransientDesigner) to keep values legal.
///
/// [`ParameterInfo`]: attacca_core::ParameterInfo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientParams {
    /// Attack boost (positive) or cut (negative), percent.
    pub attack_amount: f32,
    /// Attack time of the attack follower, ms.
    pub attack_time_ms: f32,
    /// Attack threshold, dB. Reported through diagnostics only.
    pub attack_threshold_db: f32,
    /// Sustain boost (positive) or cut (negative), percent.
    pub sustain_amount: f32,
    /// Release time of both followers, ms.
    pub release_time_ms: f32,
    /// Sustain threshold, dB. Reported through diagnostics only.
    pub sustain_threshold_db: f32,
    /// Masking threshold, dB. Stored but inert.
    pub masking_threshold_db: f32,
    /// Attack-path weighting by transient strength.
    pub critical_band_weight: f32,
    /// Sustain-path weighting by absence of transients.
    pub temporal_weight: f32,
    /// SNAP drive, percent (0–200).
    pub snap_amount: f32,
    /// SNAP curve hardness.
    pub snap_hardness: f32,
    /// Square-law gain enhancement, percent.
    pub harmonic_enhancement: f32,
    /// Attack gain multiplier applied when above 1.
    pub focus: f32,
    /// HF saturation drive.
    pub hf_gain: f32,
    /// HF saturation amount, percent.
    pub hf_saturation: f32,
    /// Tape clipper on the processed path.
    pub tape_clip: bool,
    /// Final clipper on the output.
    pub clipper_enabled: bool,
    /// Final clipper ceiling (linear).
    pub clipper_ceiling: f32,
    /// Final clipper curve.
    pub clipper_type: ClipperType,
    /// Final clipper pre-gain (linear).
    pub clipper_drive: f32,
    /// Dry/wet mix as a fraction.
    pub mix: f32,
    /// RMS-matched makeup gain.
    pub auto_gain_comp: bool,
}

impl Default for TransientParams {
    fn default() -> Self {
        Self {
            attack_amount: 0.0,
            attack_time_ms: 1.0,
            attack_threshold_db: -40.0,
            sustain_amount: 0.0,
            release_time_ms: 100.0,
            sustain_threshold_db: -40.0,
            masking_threshold_db: -15.0,
            critical_band_weight: 1.0,
            temporal_weight: 1.0,
            snap_amount: 0.0,
            snap_hardness: 1.0,
            harmonic_enhancement: 0.0,
            focus: 1.0,
            hf_gain: 1.0,
            hf_saturation: 0.0,
            tape_clip: false,
            clipper_enabled: false,
            clipper_ceiling: 0.8,
            clipper_type: ClipperType::Quintic,
            clipper_drive: 2.0,
            mix: 1.0,
            auto_gain_comp: true,
        }
    }
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

impl TransientParams {
    /// Value of `index` in display units (mix in percent, switches as 0/1,
    /// clipper type as its index). Indices outside 1..=22 return `None`.
    pub fn get(&self, index: usize) -> Option<f32> {
        let value = match index {
            1 => self.attack_amount,
            2 => self.attack_time_ms,
            3 => self.attack_threshold_db,
            4 => self.sustain_amount,
            5 => self.release_time_ms,
            6 => self.sustain_threshold_db,
            7 => self.masking_threshold_db,
            8 => self.critical_band_weight,
            9 => self.temporal_weight,
            10 => self.snap_amount,
            11 => self.snap_hardness,
            12 => self.harmonic_enhancement,
            13 => self.focus,
            14 => self.hf_gain,
            15 => self.hf_saturation,
            16 => flag(self.tape_clip),
            17 => flag(self.clipper_enabled),
            18 => self.clipper_ceiling,
            19 => self.clipper_type.index() as f32,
            20 => self.clipper_drive,
            21 => self.mix * 100.0,
            22 => flag(self.auto_gain_comp),
            _ => return None,
        };
        Some(value)
    }

    /// Set `index` from a display-unit value, clamped to its descriptor range.
    /// Returns `false` for indices outside 1..=22.
    pub fn set(&mut self, index: usize, value: f32) -> bool {
        let Some(desc) = DESCRIPTORS.get(index) else {
            return false;
        };
        let value = desc.clamp(value);
        let on = value >= 0.5;
        match index {
            1 => self.attack_amount = value,
            2 => self.attack_time_ms = value,
            3 => self.attack_threshold_db = value,
            4 => self.sustain_amount = value,
            5 => self.release_time_ms = value,
            6 => self.sustain_threshold_db = value,
            7 => self.masking_threshold_db = value,
            8 => self.critical_band_weight = value,
            9 => self.temporal_weight = value,
            10 => self.snap_amount = value,
            11 => self.snap_hardness = value,
            12 => self.harmonic_enhancement = value,
            13 => self.focus = value,
            14 => self.hf_gain = value,
            15 => self.hf_saturation = value,
            16 => self.tape_clip = on,
            17 => self.clipper_enabled = on,
            18 => self.clipper_ceiling = value,
            19 => self.clipper_type = ClipperType::from_index(libm::roundf(value) as usize),
            20 => self.clipper_drive = value,
            21 => self.mix = value / 100.0,
            22 => self.auto_gain_comp = on,
            _ => return false,
        }
        true
    }

    /// Copy with every field clamped to its legal range. NaN fields fall back
    /// to their defaults.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let mut out = defaults;
        for index in 1..=22 {
            let value = self
                .get(index)
                .filter(|v| !v.is_nan())
                .or_else(|| defaults.get(index))
                .unwrap_or(0.0);
            out.set(index, value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_ids_are_sequential() {
        for (i, desc) in DESCRIPTORS.iter().enumerate() {
            assert_eq!(desc.id, ParamId(PARAM_ID_BASE + i as u32), "{}", desc.name);
            assert!(!desc.string_id.is_empty());
        }
    }

    #[test]
    fn test_string_ids_unique() {
        for (i, a) in DESCRIPTORS.iter().enumerate() {
            for b in &DESCRIPTORS[i + 1..] {
                assert_ne!(a.string_id, b.string_id);
            }
        }
    }

    #[test]
    fn test_defaults_match_descriptors() {
        let params = TransientParams::default();
        for index in 1..=22 {
            let value = params.get(index).unwrap();
            assert_eq!(value, DESCRIPTORS[index].default, "{}", DESCRIPTORS[index].name);
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut params = TransientParams::default();
        assert!(params.set(21, 25.0));
        assert_eq!(params.mix, 0.25);
        assert_eq!(params.get(21), Some(25.0));

        assert!(params.set(19, 5.0));
        assert_eq!(params.clipper_type, ClipperType::Arctangent);

        assert!(params.set(16, 1.0));
        assert!(params.tape_clip);
    }

    #[test]
    fn test_set_clamps() {
        let mut params = TransientParams::default();
        params.set(2, 0.0);
        assert_eq!(params.attack_time_ms, 0.1);
        params.set(10, 500.0);
        assert_eq!(params.snap_amount, 200.0);
    }

    #[test]
    fn test_wrapper_indices_rejected() {
        let mut params = TransientParams::default();
        for index in [INPUT_GAIN, BYPASS, OUTPUT_GAIN, 99] {
            assert_eq!(params.get(index), None);
            assert!(!params.set(index, 1.0));
        }
        assert_eq!(params, TransientParams::default());
    }

    #[test]
    fn test_clamped() {
        let wild = TransientParams {
            attack_time_ms: -5.0,
            release_time_ms: f32::NAN,
            focus: 50.0,
            mix: 3.0,
            ..TransientParams::default()
        };
        let safe = wild.clamped();
        assert_eq!(safe.attack_time_ms, 0.1);
        assert_eq!(safe.release_time_ms, 100.0);
        assert_eq!(safe.focus, 5.0);
        assert_eq!(safe.mix, 1.0);
    }
}
