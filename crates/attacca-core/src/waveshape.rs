//! Static shaping curves used by the transient designer.
//!
//! - [`snap_curve`]: gain factor curve behind the SNAP control
//! - [`hf_saturation`]: additive square-law brightness term
//! - [`tape_clip`]: odd-symmetric soft clipper with a hard 0.95 ceiling
//!
//! None of these carry state; they are plain functions called per sample.

use libm::tanhf;

use crate::math::pow5;

/// Upper bound applied by [`tape_clip`].
pub const TAPE_CEILING: f32 = 0.95;

/// SNAP gain curve.
///
/// Maps a drive amount `x` to a multiplicative factor through three regions
/// of the magnitude `m = |x|`:
///
/// | Region | Factor |
/// |--------|--------|
/// | `m = 0` | `1.0` (neutral) |
/// | `m < 0.1` | `1 + m * h * 0.5` (linear boost) |
/// | `m < 0.5` | `1 + (m / 0.5)² * h * 0.3` (quadratic) |
/// | otherwise | `1.3 + e / (1 + e * h) * 0.2`, `e = m - 0.5` |
///
/// where `h` is the hardness. The top region rises from 1.3 toward the
/// asymptote `1.3 + 0.2 / h`.
///
/// # Example
///
/// ```rust
/// use attacca_core::snap_curve;
///
/// assert_eq!(snap_curve(0.0, 4.0), 1.0);
/// assert!(snap_curve(0.3, 1.0) > 1.0);
/// ```
#[inline]
pub fn snap_curve(x: f32, hardness: f32) -> f32 {
    let mag = x.abs();
    if mag == 0.0 {
        1.0
    } else if mag < 0.1 {
        1.0 + mag * hardness * 0.5
    } else if mag < 0.5 {
        let n = mag / 0.5;
        1.0 + n * n * hardness * 0.3
    } else {
        let excess = mag - 0.5;
        1.3 + excess / (1.0 + excess * hardness) * 0.2
    }
}

/// Additive high-frequency saturation: `x + x² * hf_gain * (amount / 100) * 0.3`.
///
/// `amount` is a percentage. The square term is always added, so the stage
/// introduces even harmonics and a small positive offset on loud material.
#[inline]
pub fn hf_saturation(x: f32, hf_gain: f32, amount: f32) -> f32 {
    x + x * x * hf_gain * (amount / 100.0) * 0.3
}

/// Tape-style clipper: `clamp(tanh(x⁵ + x) * 0.95, -0.95, 0.95)`.
///
/// The fifth power keeps the sign of `x`, so the curve is odd-symmetric.
///
/// # Example
///
/// ```rust
/// use attacca_core::tape_clip;
///
/// assert_eq!(tape_clip(0.0), 0.0);
/// assert_eq!(tape_clip(-0.4), -tape_clip(0.4));
/// assert!(tape_clip(10.0) <= 0.95);
/// ```
#[inline]
pub fn tape_clip(x: f32) -> f32 {
    (tanhf(pow5(x) + x) * TAPE_CEILING).clamp(-TAPE_CEILING, TAPE_CEILING)
}
