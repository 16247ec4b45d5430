//! Dual envelope transient detector.
//!
//! Transient strength is the positive gap between a fast envelope that jumps
//! to every new peak and a slow envelope that lags behind it. On an onset the
//! fast envelope leads and the gap opens; once the level settles the slow
//! envelope catches up and the gap closes. There is no threshold and no gate
//! state, so the output is a continuous control signal in `[0, ∞)`.
//!
//! | Envelope | Attack | Release |
//! |----------|--------|---------|
//! | Fast     | instant | 10 ms  |
//! | Slow     | 50 ms   | 100 ms |
//!
//! The time constants are fixed and only depend on the sample rate.

use crate::envelope::time_constant_coeff;
use crate::math::flush_denormal;

/// Release time of the fast envelope.
pub const FAST_RELEASE_MS: f32 = 10.0;
/// Attack time of the slow envelope.
pub const SLOW_ATTACK_MS: f32 = 50.0;
/// Release time of the slow envelope.
pub const SLOW_RELEASE_MS: f32 = 100.0;

/// Fast/slow envelope pair producing a transient-strength estimate.
///
/// # Example
///
/// ```rust
/// use attacca_core::DualEnvelopeDetector;
///
/// let mut detector = DualEnvelopeDetector::new(48000.0);
/// let onset = detector.process(1.0);
/// assert!(onset > 0.9);
///
/// // Sustained level: the slow envelope converges and strength falls.
/// let mut strength = onset;
/// for _ in 0..48_000 {
///     strength = detector.process(1.0);
/// }
/// assert!(strength < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct DualEnvelopeDetector {
    fast: f32,
    slow: f32,
    fast_release_coeff: f32,
    slow_attack_coeff: f32,
    slow_release_coeff: f32,
}

impl DualEnvelopeDetector {
    /// Create a detector prepared for `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        let mut detector = Self {
            fast: 0.0,
            slow: 0.0,
            fast_release_coeff: 0.0,
            slow_attack_coeff: 0.0,
            slow_release_coeff: 0.0,
        };
        detector.prepare(sample_rate);
        detector
    }

    /// Fix the internal coefficients for `sample_rate`.
    ///
    /// Envelope levels are left untouched; call [`reset`](Self::reset) to
    /// clear them.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.fast_release_coeff = time_constant_coeff(FAST_RELEASE_MS, sample_rate);
        self.slow_attack_coeff = time_constant_coeff(SLOW_ATTACK_MS, sample_rate);
        self.slow_release_coeff = time_constant_coeff(SLOW_RELEASE_MS, sample_rate);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "dual_envelope_prepare: sr={sample_rate} fast_rel={:.6} slow_att={:.6} slow_rel={:.6}",
            self.fast_release_coeff,
            self.slow_attack_coeff,
            self.slow_release_coeff
        );
    }

    /// Feed one sample and return the transient strength `max(0, fast - slow)`.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let level = input.abs();

        self.fast = if level > self.fast {
            level
        } else {
            flush_denormal(
                self.fast_release_coeff * self.fast + (1.0 - self.fast_release_coeff) * level,
            )
        };

        let slow_coeff = if level > self.slow {
            self.slow_attack_coeff
        } else {
            self.slow_release_coeff
        };
        self.slow = flush_denormal(slow_coeff * self.slow + (1.0 - slow_coeff) * level);

        (self.fast - self.slow).max(0.0)
    }

    /// Current fast envelope level.
    pub fn fast(&self) -> f32 {
        self.fast
    }

    /// Current slow envelope level.
    pub fn slow(&self) -> f32 {
        self.slow
    }

    /// Current transient strength without advancing.
    pub fn strength(&self) -> f32 {
        (self.fast - self.slow).max(0.0)
    }

    /// Zero both envelopes.
    pub fn reset(&mut self) {
        self.fast = 0.0;
        self.slow = 0.0;
    }
}

impl Default for DualEnvelopeDetector {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
