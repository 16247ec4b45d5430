//! Peak-rectifying attack/release follower.
//!
//! Both user-facing detectors (attack and sustain) are instances of this
//! type; the transient detector in [`dual_envelope`](crate::dual_envelope)
//! reuses [`time_constant_coeff`] for its fixed pair.

use libm::expf;

use crate::math::flush_denormal;

/// One-pole smoothing coefficient for a time constant of `time_ms`.
///
/// `exp(-1 / (time_ms * sample_rate / 1000))`, or `0.0` (no smoothing) when
/// the time constant spans zero samples. Negative times are passed through
/// and give a coefficient above 1.
#[inline]
pub fn time_constant_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    let samples = time_ms * sample_rate * 0.001;
    if samples == 0.0 { 0.0 } else { expf(-1.0 / samples) }
}

/// Rising and falling coefficients, derived together.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ballistics {
    rise: f32,
    fall: f32,
}

impl Ballistics {
    fn new(attack_ms: f32, release_ms: f32, sample_rate: f32) -> Self {
        Self {
            rise: time_constant_coeff(attack_ms, sample_rate),
            fall: time_constant_coeff(release_ms, sample_rate),
        }
    }

    #[inline]
    fn pick(&self, rising: bool) -> f32 {
        if rising { self.rise } else { self.fall }
    }
}

/// Amplitude follower with separate attack and release.
///
/// ```text
/// c      = |x| > env ? attack : release
/// env'   = c * env + (1 - c) * |x|
/// ```
///
/// The result is flushed to zero below the denormal floor, so silence
/// settles at exactly `0.0`.
///
/// ```rust
/// use attacca_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 100.0);
/// let level = env.process(-0.5);
/// assert!(level > 0.0 && level <= 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    level: f32,
    ballistics: Ballistics,
}

impl EnvelopeFollower {
    /// Follower with 1 ms attack and 100 ms release.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_times(sample_rate, 1.0, 100.0)
    }

    /// Follower with explicit attack and release times.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        Self {
            level: 0.0,
            ballistics: Ballistics::new(attack_ms, release_ms, sample_rate),
        }
    }

    /// Retune without touching the held level.
    ///
    /// Times are taken as given; zero means instantaneous.
    pub fn set_times(&mut self, attack_ms: f32, release_ms: f32, sample_rate: f32) {
        self.ballistics = Ballistics::new(attack_ms, release_ms, sample_rate);
    }

    /// Advance by one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let target = input.abs();
        let c = self.ballistics.pick(target > self.level);
        self.level = flush_denormal(c * self.level + (1.0 - c) * target);
        self.level
    }

    /// Held level, without advancing.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Drop the held level to zero.
    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
