//! Transient designer with trims, bypass and parameter metadata.
//!
//! [`TransientDesigner`] wraps [`TransientDesignerCore`] with the
//! plugin-level controls and exposes all of them through [`ParameterInfo`].
//!
//! # Signal Flow
//!
//! ```text
//! Input → Input Trim → TransientDesignerCore → Output Trim → Output
//!   └─────────────────── bypass ──────────────────────────────┘
//! ```
//!
//! # Parameters
//!
//! | Parameter | Range | Description |
//! |-----------|-------|-------------|
//! | Attack Amount | -100 to 100% | Boost or cut of detected onsets |
//! | Sustain Amount | -100 to 100% | Boost or cut of the body |
//! | Snap | 0-200% | Extra onset drive through the SNAP curve |
//! | Focus | 1-5 | Attack gain multiplier |
//! | Mix | 0-100% | Dry/wet balance |
//!
//! See [`params`](crate::params) for the full index table.
//!
//! # Tips
//!
//! - **Positive attack, negative sustain**: tight, dry drums
//! - **Negative attack, positive sustain**: softened hits with more room
//! - **Clipper + drive**: catches the peaks a strong attack boost creates

use alloc::boxed::Box;

use attacca_core::gain::Trim;
use attacca_core::{Effect, ParamDescriptor, ParameterInfo};

use crate::diagnostics::{Diagnostics, DiagnosticsObserver};
use crate::params::{BYPASS, DESCRIPTORS, INPUT_GAIN, OUTPUT_GAIN, PARAM_COUNT, TransientParams};
use crate::processor::TransientDesignerCore;

/// Multichannel transient designer.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Input Gain | -24.0–24.0 dB | 0.0 |
/// | 1 | Attack Amount | -100–100% | 0 |
/// | 4 | Sustain Amount | -100–100% | 0 |
/// | 19 | Clipper Type | Hard…Arctangent | Quintic |
/// | 21 | Mix | 0–100% | 100 |
/// | 23 | Bypass | Off/On | Off |
/// | 24 | Output Gain | -24.0–24.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use attacca_core::ParameterInfo;
/// use attacca_effects::TransientDesigner;
///
/// let mut designer = TransientDesigner::new(48000.0, 2);
/// let attack = designer.find_param("attack_amount").unwrap();
/// designer.set_param(attack, 60.0);
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// left[10] = 0.9;
/// right[10] = 0.9;
/// designer.process_block(&mut [&mut left[..], &mut right[..]]);
/// ```
#[derive(Debug)]
pub struct TransientDesigner {
    core: TransientDesignerCore,
    params: TransientParams,
    input: Trim,
    output: Trim,
    bypass: bool,
}

impl TransientDesigner {
    /// Create a designer with default parameters.
    pub fn new(sample_rate: f32, num_channels: usize) -> Self {
        Self {
            core: TransientDesignerCore::new(sample_rate, num_channels),
            params: TransientParams::default(),
            input: Trim::new(),
            output: Trim::new(),
            bypass: false,
        }
    }

    /// Re-prepare for a new rate or channel count. Clears all state.
    pub fn prepare(&mut self, sample_rate: f32, num_channels: usize) {
        self.core.prepare(sample_rate, num_channels);
    }

    /// Current parameter snapshot.
    pub fn params(&self) -> &TransientParams {
        &self.params
    }

    /// Replace the whole snapshot. Values are clamped to their ranges.
    pub fn set_params(&mut self, params: &TransientParams) {
        self.params = params.clamped();
    }

    /// Restore every parameter, including trims and bypass, to its default.
    pub fn reset_to_defaults(&mut self) {
        self.params = TransientParams::default();
        self.input = Trim::new();
        self.output = Trim::new();
        self.bypass = false;
    }

    /// Input trim in dB.
    pub fn input_gain_db(&self) -> f32 {
        self.input.db()
    }

    /// Set the input trim in dB.
    pub fn set_input_gain_db(&mut self, db: f32) {
        self.input.set_db(db);
    }

    /// Output trim in dB.
    pub fn output_gain_db(&self) -> f32 {
        self.output.db()
    }

    /// Set the output trim in dB.
    pub fn set_output_gain_db(&mut self, db: f32) {
        self.output.set_db(db);
    }

    /// True when bypassed.
    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    /// Engage or release bypass.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    /// Wrapped engine.
    pub fn core(&self) -> &TransientDesignerCore {
        &self.core
    }

    /// Latest channel-0 diagnostics.
    pub fn diagnostics(&self) -> Diagnostics {
        self.core.diagnostics()
    }

    /// Install (or remove) the periodic diagnostics observer.
    pub fn set_observer(&mut self, observer: Option<Box<dyn DiagnosticsObserver + Send>>) {
        self.core.set_observer(observer);
    }

    /// Observer interval in samples; `None` restores one second.
    pub fn set_report_interval(&mut self, samples: Option<u64>) {
        self.core.set_report_interval(samples);
    }

    /// Process planar `channels` in place.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        if self.bypass {
            return;
        }
        for buffer in channels.iter_mut() {
            self.input.apply(buffer);
        }
        self.core.process_block(channels, &self.params);
        for buffer in channels.iter_mut() {
            self.output.apply(buffer);
        }
    }

    /// Process frame-interleaved audio in place.
    pub fn process_interleaved(&mut self, buffer: &mut [f32]) {
        if self.bypass {
            return;
        }
        self.input.apply(buffer);
        self.core.process_interleaved(buffer, &self.params);
        self.output.apply(buffer);
    }
}

impl Default for TransientDesigner {
    fn default() -> Self {
        Self::new(48000.0, 2)
    }
}

impl Effect for TransientDesigner {
    fn process(&mut self, input: f32) -> f32 {
        let mut sample = [input];
        self.process_block_inplace(&mut sample);
        sample[0]
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        let len = input.len().min(output.len());
        output[..len].copy_from_slice(&input[..len]);
        self.process_block_inplace(&mut output[..len]);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        if self.bypass {
            return;
        }
        self.input.apply(buffer);
        self.core.process_channel(0, buffer, &self.params);
        self.output.apply(buffer);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let channels = self.core.num_channels().max(1);
        self.core.prepare(sample_rate, channels);
    }

    fn reset(&mut self) {
        self.core.reset();
    }
}

impl ParameterInfo for TransientDesigner {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            INPUT_GAIN => self.input.db(),
            BYPASS => {
                if self.bypass {
                    1.0
                } else {
                    0.0
                }
            }
            OUTPUT_GAIN => self.output.db(),
            _ => self.params.get(index).unwrap_or(0.0),
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if value.is_nan() {
            return;
        }
        match index {
            INPUT_GAIN => self.input.set_db(value),
            BYPASS => self.bypass = value >= 0.5,
            OUTPUT_GAIN => self.output.set_db(value),
            _ => {
                self.params.set(index, value);
            }
        }
    }
}
