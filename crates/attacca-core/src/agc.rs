//! Loudness-matching auto gain compensation.
//!
//! Tracks the smoothed power of the signal entering and leaving a processor
//! and scales the output by `sqrt(input_power / output_power)` so the
//! processed signal sits at roughly the same RMS level as the dry one.
//!
//! ```text
//! in_pow  = 0.999 * in_pow  + 0.001 * min(|x|, 2)²
//! out_pow = 0.999 * out_pow + 0.001 * min(|y|, 2)²
//! makeup  = clamp(sqrt(in_pow / out_pow), 0.1, 3.0)   when both > 1e-10
//!         = 1.0                                       otherwise
//! ```

use libm::sqrtf;

use crate::math::flush_denormal;

/// Per-sample smoothing coefficient of both power trackers.
pub const RMS_COEFF: f32 = 0.999;
/// Power level below which the makeup gain falls back to unity.
pub const POWER_FLOOR: f32 = 1e-10;
/// Smallest makeup gain.
pub const MIN_MAKEUP: f32 = 0.1;
/// Largest makeup gain.
pub const MAX_MAKEUP: f32 = 3.0;
/// Magnitude both samples are limited to before squaring.
pub const TRACKED_PEAK: f32 = 2.0;

#[inline]
fn tracked_power(x: f32) -> f32 {
    let x = x.clamp(-TRACKED_PEAK, TRACKED_PEAK);
    x * x
}

/// Input/output power tracker with makeup gain.
///
/// One instance may be shared by several channels; each call folds the
/// given sample into the running averages in call order.
///
/// # Example
///
/// ```rust
/// use attacca_core::AutoGainCompensator;
///
/// let mut agc = AutoGainCompensator::new();
/// let mut y = 0.0;
/// for _ in 0..10_000 {
///     // processor halves the level
///     y = agc.process(0.5, 0.25);
/// }
/// assert!((y - 0.5).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct AutoGainCompensator {
    input_power: f32,
    output_power: f32,
    makeup: f32,
}

impl AutoGainCompensator {
    /// Create a compensator with empty power trackers.
    pub fn new() -> Self {
        Self {
            input_power: 0.0,
            output_power: 0.0,
            makeup: 1.0,
        }
    }

    /// Fold `input` and `output` into the trackers and return the
    /// compensated output.
    #[inline]
    pub fn process(&mut self, input: f32, output: f32) -> f32 {
        self.input_power =
            flush_denormal(RMS_COEFF * self.input_power + (1.0 - RMS_COEFF) * tracked_power(input));
        self.output_power =
            flush_denormal(RMS_COEFF * self.output_power + (1.0 - RMS_COEFF) * tracked_power(output));

        self.makeup = if self.input_power > POWER_FLOOR && self.output_power > POWER_FLOOR {
            sqrtf(self.input_power / self.output_power).clamp(MIN_MAKEUP, MAX_MAKEUP)
        } else {
            1.0
        };
        output * self.makeup
    }

    /// Smoothed input power (mean square).
    pub fn input_power(&self) -> f32 {
        self.input_power
    }

    /// Smoothed output power (mean square).
    pub fn output_power(&self) -> f32 {
        self.output_power
    }

    /// Makeup gain applied by the most recent call.
    pub fn makeup_gain(&self) -> f32 {
        self.makeup
    }

    /// Clear both power trackers.
    pub fn reset(&mut self) {
        self.input_power = 0.0;
        self.output_power = 0.0;
        self.makeup = 1.0;
    }
}

impl Default for AutoGainCompensator {
    fn default() -> Self {
        Self::new()
    }
}
