//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use attacca_config::{Preset, apply_assignment};
use attacca_core::{ParamDescriptor, ParameterInfo, linear_to_db};
use attacca_effects::{Diagnostics, DiagnosticsObserver};

/// Load a preset by file path, user/system preset name, or factory name.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    Preset::find(name).with_context(|| {
        format!("Preset '{name}' not found. Use 'attacca presets list' to see available presets.")
    })
}

/// Apply `key=value` overrides in order. Each one is validated first.
pub fn apply_overrides<P: ParameterInfo>(target: &mut P, overrides: &[String]) -> anyhow::Result<()> {
    for assignment in overrides {
        let (index, value) = apply_assignment(target, assignment)?;
        tracing::debug!(index, value, "override");
    }
    Ok(())
}

/// Display a parameter value with its label or unit.
pub fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    match desc.value_label(value) {
        Some(label) => label.to_string(),
        None => format!("{}{}", trim_float(value), desc.unit.suffix()),
    }
}

fn trim_float(value: f32) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Peak absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// Root mean square over all samples.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

/// Level in dBFS, floored at -120.
pub fn level_db(linear: f32) -> f32 {
    linear_to_db(linear).max(-120.0)
}

/// Logs each diagnostics snapshot at debug level.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl DiagnosticsObserver for TracingObserver {
    fn observe(&mut self, d: &Diagnostics) {
        tracing::debug!(
            samples = d.samples_processed,
            fast = d.fast_envelope,
            slow = d.slow_envelope,
            transient = d.transient_strength,
            attack_gain = d.attack_gain,
            sustain_gain = d.sustain_gain,
            input_rms_db = level_db(d.input_rms),
            output_rms_db = level_db(d.output_rms),
            makeup = d.makeup_gain,
            "diagnostics"
        );
    }
}
