//! Multichannel transient-designer engine.
//!
//! [`TransientDesignerCore`] owns one [`ChannelState`] per channel plus a
//! single auto-gain stage shared by every channel. It processes an in-place
//! planar (or interleaved) buffer against a [`TransientParams`] snapshot read
//! once per block.
//!
//! # Signal Flow (per sample)
//!
//! ```text
//!          ┌─ attack follower ─┐ (diagnostics only)
//!          ├─ sustain follower ┘
//! x ───────┼─ dual detector ── t ── GainComputer ── (ag, sg)
//!          │                                          │
//!          └──────────── attack/sustain components ◄──┘
//!                                 │
//!             HF saturation → tape clip → dry/wet mix → AGC → clipper → y
//! ```
//!
//! Channels are processed in channel-major order: all of channel 0, then all
//! of channel 1, and so on. The auto-gain trackers are shared, so this order
//! is part of the output.

use alloc::boxed::Box;
use alloc::vec::Vec;

use attacca_core::{
    AutoGainCompensator, DualEnvelopeDetector, EnvelopeFollower, FinalClipper, crossfade,
    db_to_linear, hf_saturation, tape_clip,
};
use libm::{exp2f, powf};

use crate::diagnostics::{Diagnostics, DiagnosticsObserver};
use crate::gain_computer::{GainComputer, StageGains};
use crate::params::TransientParams;

/// Strength above which the attack component is blended in.
pub const TRANSIENT_GATE: f32 = 0.05;

/// Absolute ceiling of the mix and final output.
pub const OUTPUT_LIMIT: f32 = 2.0;

/// Input magnitude the per-sample pipeline works with (about +60 dBFS).
///
/// Larger finite values are limited to this before detection and gain, which
/// keeps every intermediate finite. Output is bounded by [`OUTPUT_LIMIT`]
/// either way.
pub const INPUT_HEADROOM: f32 = 1024.0;

/// Detection state for one channel.
#[derive(Debug, Clone)]
pub struct ChannelState {
    attack_env: EnvelopeFollower,
    sustain_env: EnvelopeFollower,
    detector: DualEnvelopeDetector,
}

impl ChannelState {
    fn new(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        Self {
            attack_env: EnvelopeFollower::with_times(sample_rate, attack_ms, release_ms),
            sustain_env: EnvelopeFollower::with_times(sample_rate, attack_ms, release_ms),
            detector: DualEnvelopeDetector::new(sample_rate),
        }
    }

    /// Attack follower level.
    pub fn attack_envelope(&self) -> f32 {
        self.attack_env.level()
    }

    /// Sustain follower level.
    pub fn sustain_envelope(&self) -> f32 {
        self.sustain_env.level()
    }

    /// Transient detector.
    pub fn detector(&self) -> &DualEnvelopeDetector {
        &self.detector
    }

    fn reset(&mut self) {
        self.attack_env.reset();
        self.sustain_env.reset();
        self.detector.reset();
    }
}

/// Values fixed for the duration of one block.
struct BlockContext {
    params: TransientParams,
    gains: GainComputer,
    clipper: FinalClipper,
    attack_threshold: f32,
    sustain_threshold: f32,
}

impl BlockContext {
    fn new(params: &TransientParams) -> Self {
        Self {
            params: *params,
            gains: GainComputer::from_params(params),
            clipper: FinalClipper::new(
                params.clipper_ceiling,
                params.clipper_drive,
                params.clipper_type,
            ),
            attack_threshold: db_to_linear(params.attack_threshold_db),
            sustain_threshold: db_to_linear(params.sustain_threshold_db),
        }
    }
}

/// Multichannel transient designer without trims or bypass.
///
/// # Example
///
/// ```rust
/// use attacca_effects::{TransientDesignerCore, TransientParams};
///
/// let mut core = TransientDesignerCore::new(44100.0, 2);
/// let params = TransientParams {
///     attack_amount: 50.0,
///     ..TransientParams::default()
/// };
///
/// let mut left = vec![0.0f32; 512];
/// let mut right = vec![0.0f32; 512];
/// left[0] = 1.0;
/// right[0] = 1.0;
/// core.process_block(&mut [&mut left[..], &mut right[..]], &params);
/// assert!(left[0].abs() > 0.0);
/// ```
pub struct TransientDesignerCore {
    sample_rate: f32,
    channels: Vec<ChannelState>,
    agc: AutoGainCompensator,
    attack_time_ms: f32,
    release_time_ms: f32,
    diagnostics: Diagnostics,
    observer: Option<Box<dyn DiagnosticsObserver + Send>>,
    custom_interval: Option<u64>,
    report_interval: u64,
    until_report: u64,
}

impl core::fmt::Debug for TransientDesignerCore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransientDesignerCore")
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels.len())
            .field("diagnostics", &self.diagnostics)
            .field("observer", &self.observer.is_some())
            .field("report_interval", &self.report_interval)
            .finish_non_exhaustive()
    }
}

impl TransientDesignerCore {
    /// Create a core prepared for `sample_rate` and `num_channels`.
    pub fn new(sample_rate: f32, num_channels: usize) -> Self {
        let defaults = TransientParams::default();
        let mut core = Self {
            sample_rate,
            channels: Vec::new(),
            agc: AutoGainCompensator::new(),
            attack_time_ms: defaults.attack_time_ms,
            release_time_ms: defaults.release_time_ms,
            diagnostics: Diagnostics::default(),
            observer: None,
            custom_interval: None,
            report_interval: 0,
            until_report: 0,
        };
        core.prepare(sample_rate, num_channels);
        core
    }

    /// Size per-channel state and fix rate-dependent coefficients. Clears all
    /// state. Allocates when the channel count grows.
    pub fn prepare(&mut self, sample_rate: f32, num_channels: usize) {
        self.sample_rate = sample_rate;
        let (attack_ms, release_ms) = (self.attack_time_ms, self.release_time_ms);
        self.channels.clear();
        self.channels
            .resize_with(num_channels, || ChannelState::new(sample_rate, attack_ms, release_ms));
        self.report_interval = self.custom_interval.unwrap_or(sample_rate as u64).max(1);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            num_channels,
            report_interval = self.report_interval,
            "transient_core_prepare"
        );

        self.reset();
    }

    /// Zero every envelope, the auto-gain trackers and the diagnostics.
    pub fn reset(&mut self) {
        for state in &mut self.channels {
            state.reset();
        }
        self.agc.reset();
        self.diagnostics = Diagnostics::default();
        self.until_report = self.report_interval;

        #[cfg(feature = "tracing")]
        tracing::debug!(channels = self.channels.len(), "transient_core_reset");
    }

    /// Prepared sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Prepared channel count.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Detection state of `channel`.
    pub fn channel(&self, channel: usize) -> Option<&ChannelState> {
        self.channels.get(channel)
    }

    /// Current auto-gain makeup factor.
    pub fn makeup_gain(&self) -> f32 {
        self.agc.makeup_gain()
    }

    /// Latest channel-0 snapshot.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Install (or remove) the periodic diagnostics observer.
    pub fn set_observer(&mut self, observer: Option<Box<dyn DiagnosticsObserver + Send>>) {
        self.observer = observer;
        self.until_report = self.report_interval;
    }

    /// Report every `samples` channel-0 samples. `None` restores the default
    /// of one second of audio.
    pub fn set_report_interval(&mut self, samples: Option<u64>) {
        self.custom_interval = samples.map(|s| s.max(1));
        self.report_interval = self.custom_interval.unwrap_or(self.sample_rate as u64).max(1);
        self.until_report = self.report_interval;
    }

    /// Current reporting interval in samples.
    pub fn report_interval(&self) -> u64 {
        self.report_interval
    }

    /// Process planar `channels` in place.
    ///
    /// Processes `min(channels.len(), num_channels())` channels; any others
    /// are left untouched.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]], params: &TransientParams) {
        debug_assert_eq!(
            channels.len(),
            self.channels.len(),
            "buffer channel count differs from prepared count"
        );
        let ctx = self.begin_block(params);
        let count = channels.len().min(self.channels.len());
        for (ch, buffer) in channels.iter_mut().take(count).enumerate() {
            for sample in buffer.iter_mut() {
                *sample = self.process_sample(ch, *sample, &ctx);
            }
        }
    }

    /// Process frame-interleaved audio in place, `num_channels()` samples per
    /// frame. A trailing partial frame is left untouched.
    ///
    /// Iteration stays channel-major so the result matches
    /// [`process_block`](Self::process_block) on the de-interleaved buffer.
    pub fn process_interleaved(&mut self, buffer: &mut [f32], params: &TransientParams) {
        let width = self.channels.len();
        if width == 0 {
            return;
        }
        debug_assert_eq!(buffer.len() % width, 0, "partial frame in interleaved buffer");
        let ctx = self.begin_block(params);
        for ch in 0..width {
            for frame in buffer.chunks_exact_mut(width) {
                frame[ch] = self.process_sample(ch, frame[ch], &ctx);
            }
        }
    }

    /// Process one channel's samples in place, leaving other channels'
    /// state untouched. Unknown channels are ignored.
    pub fn process_channel(&mut self, channel: usize, buffer: &mut [f32], params: &TransientParams) {
        if channel >= self.channels.len() {
            return;
        }
        let ctx = self.begin_block(params);
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(channel, *sample, &ctx);
        }
    }

    fn begin_block(&mut self, params: &TransientParams) -> BlockContext {
        if params.attack_time_ms != self.attack_time_ms
            || params.release_time_ms != self.release_time_ms
        {
            self.attack_time_ms = params.attack_time_ms;
            self.release_time_ms = params.release_time_ms;
            for state in &mut self.channels {
                state
                    .attack_env
                    .set_times(params.attack_time_ms, params.release_time_ms, self.sample_rate);
                state
                    .sustain_env
                    .set_times(params.attack_time_ms, params.release_time_ms, self.sample_rate);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                attack_ms = params.attack_time_ms,
                release_ms = params.release_time_ms,
                "follower_times_changed"
            );
        }
        BlockContext::new(params)
    }

    #[inline]
    fn process_sample(&mut self, ch: usize, input: f32, ctx: &BlockContext) -> f32 {
        let p = &ctx.params;
        let state = &mut self.channels[ch];
        let input = input.clamp(-INPUT_HEADROOM, INPUT_HEADROOM);

        state.attack_env.process(input);
        state.sustain_env.process(input);
        let t = state.detector.process(input);
        let gains = ctx.gains.compute(t);

        let attack = attack_component(input, p.attack_amount, gains.attack);
        let sustain = input * gains.sustain;

        let mut processed = if t > TRANSIENT_GATE {
            sustain + attack * (2.0 * t).min(1.0)
        } else if p.sustain_amount < 0.0 {
            sustain * powf(1.0 - t, 1.0 + 3.0 * p.sustain_amount.abs() / 100.0)
        } else {
            sustain
        };

        if p.hf_saturation > 0.0 {
            processed = hf_saturation(processed, p.hf_gain, p.hf_saturation);
        }
        if p.tape_clip {
            processed = tape_clip(processed);
        }

        let mixed = crossfade(input, processed, p.mix).clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT);
        let mut output = if p.auto_gain_comp {
            self.agc.process(input, mixed)
        } else {
            mixed
        };
        if p.clipper_enabled {
            output = ctx.clipper.clip(output);
        }
        let output = output.clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT);

        if ch == 0 {
            self.record(t, gains, ctx);
        }
        output
    }

    fn record(&mut self, t: f32, gains: StageGains, ctx: &BlockContext) {
        let state = &self.channels[0];
        let d = &mut self.diagnostics;
        d.fast_envelope = state.detector.fast();
        d.slow_envelope = state.detector.slow();
        d.transient_strength = t;
        d.attack_envelope = state.attack_env.level();
        d.sustain_envelope = state.sustain_env.level();
        d.attack_threshold = ctx.attack_threshold;
        d.sustain_threshold = ctx.sustain_threshold;
        d.attack_gain = gains.attack;
        d.sustain_gain = gains.sustain;
        d.input_rms = libm::sqrtf(self.agc.input_power());
        d.output_rms = libm::sqrtf(self.agc.output_power());
        d.makeup_gain = self.agc.makeup_gain();
        d.samples_processed += 1;

        if let Some(observer) = self.observer.as_mut() {
            self.until_report = self.until_report.saturating_sub(1);
            if self.until_report == 0 {
                observer.observe(&self.diagnostics);
                self.until_report = self.report_interval;
            }
        }
    }
}

impl Default for TransientDesignerCore {
    fn default() -> Self {
        Self::new(48000.0, 2)
    }
}

/// Attack component for a stage gain: an exponential boost above zero amount,
/// a plain scale below, silence at exactly zero.
#[inline]
fn attack_component(input: f32, amount: f32, gain: f32) -> f32 {
    if amount > 0.0 {
        (input * exp2f((gain - 1.0).clamp(-5.0, 5.0)) - input) * 2.0
    } else if amount < 0.0 {
        input * gain
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec;
    use core::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_attack_component_zero_amount() {
        for x in [-1.0, -0.3, 0.0, 0.5, 1.0] {
            assert_eq!(attack_component(x, 0.0, 4.0), 0.0);
        }
    }

    #[test]
    fn test_attack_component_boost() {
        // gain 2 doubles the input, component is twice the difference
        assert!((attack_component(0.5, 50.0, 2.0) - 1.0).abs() < 1e-6);
        assert_eq!(attack_component(0.5, 50.0, 1.0), 0.0);
    }

    #[test]
    fn test_attack_component_cut() {
        assert!((attack_component(0.8, -50.0, 0.25) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_defaults_are_transparent_on_steady_signal() {
        let mut core = TransientDesignerCore::new(48000.0, 1);
        let params = TransientParams {
            auto_gain_comp: false,
            ..TransientParams::default()
        };
        let input: Vec<f32> = (0..1024).map(|i| libm::sinf(i as f32 * 0.05) * 0.5).collect();
        let mut buffer = input.clone();
        core.process_block(&mut [&mut buffer[..]], &params);
        for (x, y) in input.iter().zip(&buffer) {
            assert!((x - y).abs() < 1e-6, "{x} -> {y}");
        }
    }

    #[test]
    fn test_mix_zero_is_bit_identical() {
        let mut core = TransientDesignerCore::new(44100.0, 1);
        let params = TransientParams {
            mix: 0.0,
            ..TransientParams::default()
        };
        let input: Vec<f32> = (0..2048)
            .map(|i| libm::sinf(i as f32 * 0.013) * if i % 500 < 20 { 1.0 } else { 0.2 })
            .collect();
        let mut buffer = input.clone();
        core.process_block(&mut [&mut buffer[..]], &params);
        assert_eq!(buffer, input);
    }

    #[test]
    fn test_output_limited() {
        let mut core = TransientDesignerCore::new(48000.0, 1);
        let params = TransientParams {
            attack_amount: 100.0,
            sustain_amount: 100.0,
            focus: 5.0,
            hf_gain: 10.0,
            hf_saturation: 100.0,
            auto_gain_comp: false,
            ..TransientParams::default()
        };
        let mut buffer: Vec<f32> = (0..4096).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        core.process_block(&mut [&mut buffer[..]], &params);
        assert!(buffer.iter().all(|y| y.abs() <= OUTPUT_LIMIT));
    }

    fn run_mono(params: &TransientParams, input: &[f32]) -> Vec<f32> {
        let mut core = TransientDesignerCore::new(48000.0, 1);
        let mut buffer = input.to_vec();
        core.process_block(&mut [&mut buffer[..]], params);
        buffer
    }

    #[test]
    fn test_huge_input_dry_path_stays_finite() {
        let boosted = TransientParams {
            mix: 0.0,
            sustain_amount: 100.0,
            ..TransientParams::default()
        };
        assert_eq!(
            run_mono(&boosted, &[f32::MAX, 0.5, 1e20, 0.5]),
            [2.0, 0.5, 2.0, 0.5]
        );

        let saturated = TransientParams {
            mix: 0.0,
            hf_saturation: 100.0,
            hf_gain: 10.0,
            ..TransientParams::default()
        };
        assert_eq!(run_mono(&saturated, &[1e20, -f32::MAX, 0.5]), [2.0, -2.0, 0.5]);
    }

    #[test]
    fn test_huge_input_every_stage_bounded() {
        let params = TransientParams {
            attack_amount: 100.0,
            sustain_amount: -100.0,
            snap_amount: 200.0,
            harmonic_enhancement: 100.0,
            focus: 5.0,
            hf_gain: 10.0,
            hf_saturation: 100.0,
            tape_clip: true,
            mix: 0.5,
            ..TransientParams::default()
        };
        let input = [f32::MAX, -f32::MAX, 1e30, -1e20, 0.5, -0.5, 0.0];
        for y in run_mono(&params, &input) {
            assert!(y.is_finite() && y.abs() <= OUTPUT_LIMIT, "{y}");
        }
    }

    #[test]
    fn test_spike_leaves_makeup_at_unity() {
        let out = run_mono(&TransientParams::default(), &[1e20, 0.5, 0.5, 0.5]);
        assert_eq!(out[0], 2.0);
        for y in &out[1..] {
            assert!((y - 0.5).abs() < 1e-6, "{y}");
        }
    }

    #[test]
    fn test_sustain_boost_planar_and_interleaved() {
        let mut core = TransientDesignerCore::new(48000.0, 1);
        let params = TransientParams {
            sustain_amount: 100.0,
            auto_gain_comp: false,
            ..TransientParams::default()
        };
        let mut a = vec![0.25f32; 64];
        core.process_block(&mut [&mut a[..]], &params);
        assert!(a.iter().all(|&y| y > 0.25));

        let mut interleaved = vec![0.25f32; 65];
        core.process_interleaved(&mut interleaved, &params);
        assert!(interleaved[..64].iter().all(|&y| y > 0.25));
    }

    #[test]
    fn test_interleaved_matches_planar() {
        let params = TransientParams {
            attack_amount: 70.0,
            sustain_amount: -40.0,
            snap_amount: 80.0,
            ..TransientParams::default()
        };
        let frames = 1500;
        let left: Vec<f32> = (0..frames)
            .map(|i| libm::sinf(i as f32 * 0.07) * libm::expf(-((i % 300) as f32) / 60.0))
            .collect();
        let right: Vec<f32> = left.iter().map(|x| -0.7 * x).collect();

        let mut planar = TransientDesignerCore::new(48000.0, 2);
        let (mut l, mut r) = (left.clone(), right.clone());
        planar.process_block(&mut [&mut l[..], &mut r[..]], &params);

        let mut interleaved_core = TransientDesignerCore::new(48000.0, 2);
        let mut interleaved: Vec<f32> = left
            .iter()
            .zip(&right)
            .flat_map(|(&a, &b)| [a, b])
            .collect();
        interleaved_core.process_interleaved(&mut interleaved, &params);

        for i in 0..frames {
            assert_eq!(interleaved[2 * i], l[i]);
            assert_eq!(interleaved[2 * i + 1], r[i]);
        }
    }

    #[test]
    fn test_follower_times_follow_params() {
        let mut core = TransientDesignerCore::new(48000.0, 1);
        let params = TransientParams {
            attack_time_ms: 10.0,
            release_time_ms: 500.0,
            ..TransientParams::default()
        };
        let mut buffer = vec![1.0f32; 48];
        core.process_block(&mut [&mut buffer[..]], &params);
        // one time constant of attack at 10 ms is 480 samples; 48 is far short
        let level = core.channel(0).map(ChannelState::attack_envelope).unwrap();
        assert!(level > 0.05 && level < 0.2, "attack envelope {level}");
    }

    #[test]
    fn test_reset_clears_state() {
        let mut core = TransientDesignerCore::new(48000.0, 2);
        let params = TransientParams::default();
        let mut a = vec![0.8f32; 256];
        let mut b = vec![0.8f32; 256];
        core.process_block(&mut [&mut a[..], &mut b[..]], &params);
        assert!(core.diagnostics().samples_processed == 256);

        core.reset();
        assert_eq!(core.diagnostics(), Diagnostics::default());
        assert_eq!(core.makeup_gain(), 1.0);
        for ch in 0..2 {
            let state = core.channel(ch).unwrap();
            assert_eq!(state.detector().fast(), 0.0);
            assert_eq!(state.attack_envelope(), 0.0);
        }
    }

    #[test]
    fn test_diagnostics_track_channel_zero() {
        let mut core = TransientDesignerCore::new(48000.0, 2);
        let params = TransientParams::default();
        let mut a = vec![0.0f32; 128];
        let mut b = vec![0.0f32; 128];
        a[100] = 1.0;
        core.process_block(&mut [&mut a[..], &mut b[..]], &params);
        let d = core.diagnostics();
        assert_eq!(d.samples_processed, 128);
        assert!(d.fast_envelope > 0.0);
        assert!(d.transient_strength > 0.0);
        assert!((d.attack_threshold - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_observer_fires_per_interval() {
        let calls = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&calls);
        let mut core = TransientDesignerCore::new(48000.0, 1);
        core.set_report_interval(Some(100));
        core.set_observer(Some(Box::new(move |d: &Diagnostics| {
            assert_eq!(d.samples_processed % 100, 0);
            seen.fetch_add(1, Ordering::Relaxed);
        })));

        let mut buffer = vec![0.1f32; 1050];
        core.process_block(&mut [&mut buffer[..]], &TransientParams::default());
        assert_eq!(calls.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_default_report_interval_is_one_second() {
        let mut core = TransientDesignerCore::new(44100.0, 1);
        assert_eq!(core.report_interval(), 44100);
        core.set_report_interval(Some(10));
        core.prepare(96000.0, 1);
        assert_eq!(core.report_interval(), 10);
        core.set_report_interval(None);
        assert_eq!(core.report_interval(), 96000);
    }
}
