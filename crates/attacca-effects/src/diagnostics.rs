//! Envelope diagnostics.
//!
//! The core keeps a [`Diagnostics`] snapshot of channel 0 that is refreshed
//! every sample and can be read at any time. An optional
//! [`DiagnosticsObserver`] receives a copy every `interval` samples; nothing
//! in the audio path formats or prints on its own.

/// Point-in-time view of the channel-0 detector and gain state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Diagnostics {
    /// Fast detector envelope.
    pub fast_envelope: f32,
    /// Slow detector envelope.
    pub slow_envelope: f32,
    /// `max(0, fast - slow)`.
    pub transient_strength: f32,
    /// Attack follower level.
    pub attack_envelope: f32,
    /// Sustain follower level.
    pub sustain_envelope: f32,
    /// Attack threshold as a linear level.
    pub attack_threshold: f32,
    /// Sustain threshold as a linear level.
    pub sustain_threshold: f32,
    /// Attack-path gain.
    pub attack_gain: f32,
    /// Sustain-path gain.
    pub sustain_gain: f32,
    /// Smoothed input RMS of the auto-gain stage.
    pub input_rms: f32,
    /// Smoothed output RMS of the auto-gain stage.
    pub output_rms: f32,
    /// Makeup gain of the auto-gain stage.
    pub makeup_gain: f32,
    /// Channel-0 samples processed since the last reset.
    pub samples_processed: u64,
}

/// Receiver for periodic [`Diagnostics`] snapshots.
///
/// Called on the audio thread: implementations must not block.
pub trait DiagnosticsObserver {
    /// Called once per reporting interval with the latest snapshot.
    fn observe(&mut self, snapshot: &Diagnostics);
}

impl<F: FnMut(&Diagnostics)> DiagnosticsObserver for F {
    fn observe(&mut self, snapshot: &Diagnostics) {
        self(snapshot);
    }
}
